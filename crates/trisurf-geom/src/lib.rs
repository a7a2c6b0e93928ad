#![warn(missing_docs)]

//! Plane geometry and view transforms for trisurf.
//!
//! A sampled cutting plane can have any orientation in 3D. To draw it
//! flat, each point is re-expressed in a view basis `(x, y, z = x × y)`
//! anchored at a chosen point of the plane:
//!
//! ```text
//! T · [p, 1] = [x_view, y_view, z_view, 1]
//! ```
//!
//! `x_view, y_view` are the plot coordinates. `z_view` is zero for points
//! on the plane when `x` and `y` lie in it.
//!
//! # Example
//!
//! ```
//! use trisurf_geom::{project_points, PlaneEquation, ViewTransform};
//! use trisurf_math::{Point3, Vec3};
//!
//! let points = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let plane = PlaneEquation::fit(&points).unwrap();
//! assert_eq!(plane.as_array(), [0.0, 0.0, 1.0, 0.0]);
//!
//! let (view, _basis) =
//!     ViewTransform::build(&Point3::new(1.0, 0.0, 0.0), &Vec3::x(), &Vec3::y()).unwrap();
//! let xy = project_points(&points, &view.forward);
//! assert!((xy[0].x + 1.0).abs() < 1e-12);
//! ```

mod plane;
mod project;
mod view;

pub use plane::PlaneEquation;
pub use project::{project_point, project_points};
pub use view::{ViewBasis, ViewTransform};

use thiserror::Error;

/// Errors from plane and view-basis construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeomError {
    /// At least three points are needed to fit a plane.
    #[error("need at least 3 points to fit a plane, got {0}")]
    TooFewPoints(usize),

    /// The first three points are collinear (or coincident), so the plane
    /// normal is zero.
    #[error("degenerate plane: the first three points are collinear")]
    DegeneratePlane,

    /// The view-basis directions do not span a plane, so the affine
    /// transform cannot be inverted.
    #[error("singular view basis: {0}")]
    SingularBasis(String),
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
