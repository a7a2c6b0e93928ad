#![warn(missing_docs)]

//! Readers for planar surfaces sampled by OpenFOAM.
//!
//! The `sample` utility writes a cutting plane as three "foamFile"
//! text files: the field values, the points and the faces. Each holds a
//! record count on a line of its own followed by one numeric record per
//! line. Only raw numbers are read; there is no header support.
//!
//! # Example
//!
//! ```no_run
//! use trisurf_io::{read_faces, read_field, read_points};
//!
//! let points = read_points("surfaces/points").unwrap();
//! let faces = read_faces("surfaces/faces").unwrap();
//! let field = read_field("surfaces/scalarField/p").unwrap();
//! assert_eq!(points.len(), field.len());
//! # let _ = faces;
//! ```

mod error;
mod lexer;
mod readers;
mod table;

pub use error::{IoError, Result};
pub use readers::{
    faces_from_table, points_from_table, read_faces, read_field, read_points, read_vtk,
};
pub use table::{parse_table, read_table, Table};
