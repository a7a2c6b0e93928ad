//! Error types for foamFile reading.

use thiserror::Error;

/// Errors that can occur while reading sampled surface files.
#[derive(Error, Debug)]
pub enum IoError {
    /// I/O error opening or reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be turned into a record.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// The file held no data records.
    #[error("No data records found")]
    EmptyTable,

    /// Records have the wrong number of columns for what is being read.
    #[error("Expected {expected} columns per record, found {found}")]
    ColumnCount {
        /// Accepted column count(s), e.g. `"3"` or `"1 or 3"`.
        expected: String,
        /// Column count in the file.
        found: usize,
    },

    /// A face record is not a triangle with valid vertex indices.
    #[error("Invalid face at record {row}: {message}")]
    InvalidFace {
        /// Record index (0-indexed).
        row: usize,
        /// Error message.
        message: String,
    },

    /// The requested file format is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl IoError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid face error.
    pub fn invalid_face(row: usize, message: impl Into<String>) -> Self {
        Self::InvalidFace {
            row,
            message: message.into(),
        }
    }
}

/// Result type for reading operations.
pub type Result<T> = std::result::Result<T, IoError>;
