//! Lines in 2D and 3D space.
//!
//! A line stores an anchor point and a unit direction. Degenerate
//! constructions are rejected before any normalization runs.

use crate::point::{Point2, Point3};
use crate::vector::{GeomError, Vector2, Vector3};

/// A line in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    p: Point2,
    d: Vector2,
}

impl Line2 {
    /// The line through two distinct points, anchored at `a` and
    /// directed towards `b`. Identical points are rejected.
    pub fn through(a: Point2, b: Point2) -> Result<Self, GeomError> {
        if a == b {
            return Err(GeomError::DegenerateGeometry {
                reason: "line through two identical points",
            });
        }
        Ok(Self {
            p: a,
            d: (b - a).normalized()?,
        })
    }

    /// The line through `p` with direction `d`. The zero vector is
    /// rejected; any other direction is normalized.
    pub fn from_point_direction(p: Point2, d: Vector2) -> Result<Self, GeomError> {
        if d.is_zero() {
            return Err(GeomError::ZeroVector);
        }
        Ok(Self {
            p,
            d: d.normalized()?,
        })
    }

    /// The anchor point.
    pub fn point(&self) -> Point2 {
        self.p
    }

    /// The unit direction.
    pub fn direction(&self) -> Vector2 {
        self.d
    }

    /// The point at parameter `t`: `p + d * t`. Since the direction is
    /// unit length, `t` is a signed distance along the line.
    pub fn point_at(&self, t: f64) -> Point2 {
        self.p + self.d * t
    }

    /// Shortest distance from `q` to the line: the length of the
    /// component of `q - p` perpendicular to the direction.
    pub fn distance_to(&self, q: Point2) -> f64 {
        let w = q - self.p;
        let along = self.d * w.dot(&self.d);
        (w - along).length()
    }
}

/// A line in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    p: Point3,
    d: Vector3,
}

impl Line3 {
    /// The line through two distinct points, anchored at `a` and
    /// directed towards `b`. Identical points are rejected.
    pub fn through(a: Point3, b: Point3) -> Result<Self, GeomError> {
        if a == b {
            return Err(GeomError::DegenerateGeometry {
                reason: "line through two identical points",
            });
        }
        Ok(Self {
            p: a,
            d: (b - a).normalized()?,
        })
    }

    /// The line through `p` with direction `d`. The zero vector is
    /// rejected; any other direction is normalized.
    pub fn from_point_direction(p: Point3, d: Vector3) -> Result<Self, GeomError> {
        if d.is_zero() {
            return Err(GeomError::ZeroVector);
        }
        Ok(Self {
            p,
            d: d.normalized()?,
        })
    }

    /// The anchor point.
    pub fn point(&self) -> Point3 {
        self.p
    }

    /// The unit direction.
    pub fn direction(&self) -> Vector3 {
        self.d
    }

    /// The point at parameter `t`: `p + d * t`.
    pub fn point_at(&self, t: f64) -> Point3 {
        self.p + self.d * t
    }

    /// Shortest distance from `q` to the line.
    pub fn distance_to(&self, q: Point3) -> f64 {
        let w = q - self.p;
        let along = self.d * w.dot(&self.d);
        (w - along).length()
    }
}
