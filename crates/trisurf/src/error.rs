//! Error types for surface construction.

use thiserror::Error;
use trisurf_geom::GeomError;
use trisurf_io::IoError;

/// Errors that abort the construction of a [`crate::Surface`].
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Reading or parsing an input file failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Plane fitting or view-basis construction failed.
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// The number of field samples differs from the number of points.
    #[error("field has {fields} samples but the mesh has {points} points")]
    DimensionMismatch {
        /// Number of field samples.
        fields: usize,
        /// Number of mesh points.
        points: usize,
    },

    /// A face references a point that does not exist.
    #[error("face {face} references point {index}, but the mesh has {points} points")]
    FaceIndexOutOfRange {
        /// Face index.
        face: usize,
        /// Offending point index.
        index: usize,
        /// Number of mesh points.
        points: usize,
    },

    /// Field samples must have 1 (scalar) or 3 (vector) components.
    #[error("field samples have {0} components, expected 1 or 3")]
    InvalidFieldRank(usize),

    /// The input format is not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A configuration file could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;
