#![warn(missing_docs)]

//! trisurf - flat views of arbitrarily oriented sampled surfaces.
//!
//! A cutting plane sampled from a 3D field (OpenFOAM `sample` output)
//! can have any orientation. [`Surface`] reads or copies the mesh and
//! field values, fits the plane, builds the affine transform into a
//! caller-chosen view basis and stores the 2D view coordinates of every
//! point, ready for contour or surface plotting.
//!
//! # Example
//!
//! ```
//! use trisurf::{FieldTable, Point3, Surface, SurfaceOptions, Vec3, ViewSpec};
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let field = FieldTable::scalar(vec![1.0, 2.0, 3.0]);
//! let view = ViewSpec::new(Point3::new(1.0, 0.0, 0.0), Vec3::x(), Vec3::y());
//!
//! let surface =
//!     Surface::from_arrays(field, points, vec![[0, 1, 2]], &view, SurfaceOptions::default())
//!         .unwrap();
//! let xy = surface.view_coordinates().unwrap();
//! assert!((xy[0].x + 1.0).abs() < 1e-12);
//! ```

mod config;
mod error;
mod field;
mod mesh;
mod surface;

pub use config::{SurfaceConfig, SurfaceOptions, ViewConfig, ViewSpec};
pub use error::{Result, SurfaceError};
pub use field::{FieldRank, FieldTable};
pub use mesh::Mesh;
pub use surface::Surface;

pub use trisurf_geom::{GeomError, PlaneEquation, ViewBasis, ViewTransform};
pub use trisurf_io::IoError;
pub use trisurf_math::{Point2, Point3, Tolerance, Transform, Vec3};
