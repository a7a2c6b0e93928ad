#![warn(missing_docs)]

//! Math types for trisurf.
//!
//! Thin wrappers around nalgebra providing the types used to move
//! sampled surface points between the standard basis and a view basis:
//! points, vectors, homogeneous affine transforms, and tolerances.

use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// A point in 3D space (standard basis unless stated otherwise).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in a 2D view plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A 3x3 matrix, used for basis matrices.
pub type Mat3 = Matrix3<f64>;

/// Homogeneous coordinates `[x, y, z, 1]` of a point.
pub fn homogeneous(p: &Point3) -> Vector4<f64> {
    Vector4::new(p.x, p.y, p.z, 1.0)
}

/// A 4x4 affine transformation matrix acting on homogeneous coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Affine map with `linear` as the upper-left 3x3 block and `origin`
    /// as the translation column:
    ///
    /// ```text
    /// | linear  origin |
    /// | 0 0 0     1    |
    /// ```
    pub fn from_linear_and_origin(linear: &Mat3, origin: &Point3) -> Self {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(linear);
        m[(0, 3)] = origin.x;
        m[(1, 3)] = origin.y;
        m[(2, 3)] = origin.z;
        Self { matrix: m }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * homogeneous(p);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists and is finite.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix
            .try_inverse()
            .filter(|m| m.iter().all(|v| v.is_finite()))
            .map(|matrix| Self { matrix })
    }

    /// True if every entry is within `eps` of the identity matrix.
    pub fn is_identity(&self, eps: f64) -> bool {
        (self.matrix - Matrix4::identity()).amax() <= eps
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Absolute distance tolerance.
    pub linear: f64,
    /// Angular tolerance, compared against the sine/cosine of the angle
    /// between two vectors.
    pub angular: f64,
}

impl Tolerance {
    /// Tight tolerances for exact input (1e-9 linear, 1e-9 angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Loose tolerances for coordinates read back from text files,
    /// which usually carry about six significant digits.
    pub const SAMPLED: Self = Self {
        linear: 1e-6,
        angular: 1e-6,
    };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two vectors are parallel (or anti-parallel).
    ///
    /// A zero vector is parallel to everything.
    pub fn is_parallel(&self, a: &Vec3, b: &Vec3) -> bool {
        a.cross(b).norm() <= self.angular * a.norm() * b.norm()
    }

    /// Check if two vectors are perpendicular.
    pub fn is_perpendicular(&self, a: &Vec3, b: &Vec3) -> bool {
        a.dot(b).abs() <= self.angular * a.norm() * b.norm()
    }
}
