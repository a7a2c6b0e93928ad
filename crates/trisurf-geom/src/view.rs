//! View basis and the affine transform pair between the standard basis
//! and the view basis.

use tracing::debug;
use trisurf_math::{Mat3, Point2, Point3, Tolerance, Transform, Vec3};

use crate::plane::PlaneEquation;
use crate::{GeomError, Result};

/// A view basis `(x, y, z = x × y)` expressed in the standard basis.
///
/// The caller's `x` and `y` are used as given: they are neither
/// normalized nor orthogonalized, so view coordinates are measured in
/// units of `|x|` and `|y|`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBasis {
    matrix: Mat3,
}

impl ViewBasis {
    /// Build a basis from two in-plane directions.
    ///
    /// Fails with [`GeomError::SingularBasis`] if either direction is zero
    /// or not finite, or if they are collinear.
    pub fn new(x: &Vec3, y: &Vec3) -> Result<Self> {
        if !x.iter().chain(y.iter()).all(|v| v.is_finite()) {
            return Err(GeomError::SingularBasis(
                "view directions must be finite".into(),
            ));
        }
        if x.norm() == 0.0 || y.norm() == 0.0 {
            return Err(GeomError::SingularBasis(
                "view directions must be non-zero".into(),
            ));
        }
        if Tolerance::DEFAULT.is_parallel(x, y) {
            return Err(GeomError::SingularBasis(format!(
                "x direction {:?} and y direction {:?} are collinear",
                x.as_slice(),
                y.as_slice()
            )));
        }
        let z = x.cross(y);
        Ok(Self {
            matrix: Mat3::from_columns(&[*x, *y, z]),
        })
    }

    /// First basis vector.
    pub fn x(&self) -> Vec3 {
        self.matrix.column(0).into_owned()
    }

    /// Second basis vector.
    pub fn y(&self) -> Vec3 {
        self.matrix.column(1).into_owned()
    }

    /// Third basis vector, `x × y`. Also the viewing direction.
    pub fn z(&self) -> Vec3 {
        self.matrix.column(2).into_owned()
    }

    /// 3x3 matrix with columns `[x, y, z]`.
    pub fn matrix(&self) -> &Mat3 {
        &self.matrix
    }

    /// True if `x` and `y` are both perpendicular to the plane normal.
    pub fn is_in_plane(&self, plane: &PlaneEquation, tol: &Tolerance) -> bool {
        let n = plane.normal();
        tol.is_perpendicular(&self.x(), &n) && tol.is_perpendicular(&self.y(), &n)
    }
}

/// Affine transforms between the standard basis and a view basis.
///
/// * `forward` (T) maps standard coordinates to view coordinates.
/// * `inverse` (invT) maps view coordinates back to standard coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    /// Standard basis to view basis.
    pub forward: Transform,
    /// View basis to standard basis.
    pub inverse: Transform,
}

impl ViewTransform {
    /// Build the transform pair for a view anchored at `anchor` with
    /// in-plane directions `x` and `y`.
    ///
    /// `inverse` is `[[basis, anchor], [0, 0, 0, 1]]` and `forward` is its
    /// matrix inverse, so `anchor` maps to the view origin.
    pub fn build(anchor: &Point3, x: &Vec3, y: &Vec3) -> Result<(Self, ViewBasis)> {
        let basis = ViewBasis::new(x, y)?;
        let view = Self::from_basis(anchor, &basis)?;
        Ok((view, basis))
    }

    /// Build the transform pair from an existing basis.
    pub fn from_basis(anchor: &Point3, basis: &ViewBasis) -> Result<Self> {
        if !anchor.iter().all(|v| v.is_finite()) {
            return Err(GeomError::SingularBasis("view anchor must be finite".into()));
        }
        let inverse = Transform::from_linear_and_origin(basis.matrix(), anchor);
        let forward = inverse.inverse().ok_or_else(|| {
            GeomError::SingularBasis("affine view matrix is not invertible".into())
        })?;
        debug!(anchor = ?anchor.coords.as_slice(), "built view transform");
        Ok(Self { forward, inverse })
    }

    /// Express a standard-basis point in the view basis.
    pub fn to_view(&self, p: &Point3) -> Point3 {
        self.forward.apply_point(p)
    }

    /// Express a view-basis point in the standard basis.
    pub fn to_standard(&self, p: &Point3) -> Point3 {
        self.inverse.apply_point(p)
    }

    /// 2D view coordinates of a standard-basis point.
    pub fn project(&self, p: &Point3) -> Point2 {
        crate::project::project_point(p, &self.forward)
    }

    /// Express a standard-basis vector in the view basis (no translation).
    pub fn vector_to_view(&self, v: &Vec3) -> Vec3 {
        self.forward.apply_vec(v)
    }

    /// Express a view-basis vector in the standard basis (no translation).
    pub fn vector_to_standard(&self, v: &Vec3) -> Vec3 {
        self.inverse.apply_vec(v)
    }
}
