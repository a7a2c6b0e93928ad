//! Triangulated point cloud of a sampled surface.

use trisurf_geom::GeomError;
use trisurf_math::Point3;

use crate::error::{Result, SurfaceError};

/// Points in the standard basis plus triangles indexing into them.
///
/// Point order is significant: faces and field samples refer to points
/// by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    points: Vec<Point3>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Create a mesh, checking that it has at least three points and that
    /// every face index is in range.
    pub fn new(points: Vec<Point3>, faces: Vec<[usize; 3]>) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeomError::TooFewPoints(points.len()).into());
        }
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i >= points.len()) {
                return Err(SurfaceError::FaceIndexOutOfRange {
                    face,
                    index,
                    points: points.len(),
                });
            }
        }
        Ok(Self { points, faces })
    }

    /// Points in the standard basis.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Triangles as point index triples.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}
