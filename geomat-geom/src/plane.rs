//! Planes in 3D space.
//!
//! A plane stores an anchor point and a unit normal. Construction from
//! three points derives the normal from the cross product of the two
//! edge vectors; a vanishing cross product means the points are
//! collinear.

use crate::point::Point3;
use crate::vector::{GeomError, Vector3};

/// A plane in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    p: Point3,
    n: Vector3,
}

impl Plane {
    /// The plane through `p` with normal `n`. The zero vector is
    /// rejected; any other normal is normalized.
    pub fn from_point_normal(p: Point3, n: Vector3) -> Result<Self, GeomError> {
        if n.is_zero() {
            return Err(GeomError::ZeroVector);
        }
        Ok(Self {
            p,
            n: n.normalized()?,
        })
    }

    /// The plane through three points, anchored at `a` with normal
    /// `(b - a) x (c - a)`. Collinear (or coincident) points leave the
    /// cross product zero and are rejected.
    pub fn from_points(a: Point3, b: Point3, c: Point3) -> Result<Self, GeomError> {
        let u = b - a;
        let v = c - a;
        let n = u.cross(&v);
        if n.is_zero() {
            return Err(GeomError::DegenerateGeometry {
                reason: "plane through collinear points",
            });
        }
        Ok(Self {
            p: a,
            n: n.normalized()?,
        })
    }

    /// The anchor point.
    pub fn point(&self) -> Point3 {
        self.p
    }

    /// The unit normal.
    pub fn normal(&self) -> Vector3 {
        self.n
    }

    /// Signed distance from `q` to the plane, positive on the side the
    /// normal points into.
    pub fn signed_distance_to(&self, q: Point3) -> f64 {
        (q - self.p).dot(&self.n)
    }

    /// Shortest distance from `q` to the plane.
    pub fn distance_to(&self, q: Point3) -> f64 {
        self.signed_distance_to(q).abs()
    }

    /// The orthogonal projection of `q` onto the plane.
    pub fn project(&self, q: Point3) -> Point3 {
        q - self.n * self.signed_distance_to(q)
    }
}
