//! Implicit plane equation fitted from surface points.

use tracing::debug;
use trisurf_math::{Point3, Tolerance, Vec3};

use crate::{GeomError, Result};

/// Plane `a·x + b·y + c·z + d = 0`.
///
/// The normal `(a, b, c)` is never zero. It is not normalized: its length
/// is twice the area of the triangle the plane was fitted from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneEquation {
    normal: Vec3,
    d: f64,
}

impl PlaneEquation {
    /// Fit the plane through the first three points.
    ///
    /// `normal = (p1 - p0) × (p2 - p0)` and `d = -normal · p0`.
    /// Non-finite points or coefficients give [`GeomError::DegeneratePlane`].
    pub fn fit(points: &[Point3]) -> Result<Self> {
        let [p0, p1, p2] = match points {
            [p0, p1, p2, ..] => [p0, p1, p2],
            _ => return Err(GeomError::TooFewPoints(points.len())),
        };
        if [p0, p1, p2].iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(GeomError::DegeneratePlane);
        }
        let v1 = p1 - p0;
        let v2 = p2 - p0;
        if Tolerance::DEFAULT.is_parallel(&v1, &v2) {
            return Err(GeomError::DegeneratePlane);
        }
        let normal = v1.cross(&v2);
        let d = -normal.dot(&p0.coords);
        if !normal.iter().all(|c| c.is_finite()) || !d.is_finite() {
            return Err(GeomError::DegeneratePlane);
        }
        debug!(?normal, d, "fitted plane");
        Ok(Self { normal, d })
    }

    /// The (unnormalized) normal `(a, b, c)`.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// The offset `d`.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// `[a, b, c, d]`.
    pub fn as_array(&self) -> [f64; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.d]
    }

    /// `a·x + b·y + c·z + d` for `p`. Zero on the plane.
    pub fn residual(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) + self.d
    }

    /// Signed distance from `p` to the plane.
    pub fn distance(&self, p: &Point3) -> f64 {
        self.residual(p) / self.normal.norm()
    }

    /// True if `p` is within `tol.linear` of the plane.
    pub fn contains(&self, p: &Point3, tol: &Tolerance) -> bool {
        tol.is_zero(self.distance(p))
    }
}
