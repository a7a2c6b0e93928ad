//! Rectangular numeric tables read from foamFile text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{IoError, Result};
use crate::lexer;

/// A rectangular table of numbers, one row per record, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<f64>>,
    columns: usize,
    declared_rows: Option<usize>,
}

impl Table {
    /// Build a table from in-memory rows.
    ///
    /// All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(IoError::parse(
                i + 1,
                format!("row has {} values, expected {}", row.len(), columns),
            ));
        }
        Ok(Self {
            rows,
            columns,
            declared_rows: None,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of values per row (0 for an empty table).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The record count announced at the top of the file, if any.
    pub fn declared_rows(&self) -> Option<usize> {
        self.declared_rows
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Row `i`, if present.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    /// Copy of column `j`, or `None` if out of range.
    pub fn column(&self, j: usize) -> Option<Vec<f64>> {
        (j < self.columns).then(|| self.rows.iter().map(|r| r[j]).collect())
    }

    /// All values, row-major.
    pub fn flatten(&self) -> Vec<f64> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Consume the table, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

/// Parse a foamFile from any buffered reader.
///
/// Comment lines (starting with `//`) are skipped. Lines are then skipped
/// until one holds exactly one number: the record count. Every following
/// line with at least one number becomes a row. An input without records
/// produces an empty table.
pub fn parse_table<R: BufRead>(reader: R) -> Result<Table> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut columns = 0;
    let mut declared: Option<f64> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if lexer::is_comment(&line) {
            continue;
        }
        let values = lexer::numbers(&line, line_no)?;

        if declared.is_none() {
            if values.len() == 1 {
                declared = Some(values[0]);
            }
            continue;
        }
        if values.is_empty() {
            continue;
        }

        if rows.is_empty() {
            columns = values.len();
        } else if values.len() != columns {
            return Err(IoError::parse(
                line_no,
                format!("record has {} values, expected {}", values.len(), columns),
            ));
        }
        rows.push(values);
    }

    let declared_rows = declared
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n as usize);
    if let Some(n) = declared_rows {
        if n != rows.len() {
            warn!(declared = n, found = rows.len(), "record count mismatch");
        }
    }
    debug!(rows = rows.len(), columns, "parsed foamFile table");

    Ok(Table {
        rows,
        columns,
        declared_rows,
    })
}

/// Read a foamFile from disk.
///
/// The file is closed before returning, on success or error.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    debug!("reading {:?}", path);
    let file = File::open(path)?;
    parse_table(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn parse(text: &str) -> Result<Table> {
        parse_table(Cursor::new(text))
    }

    #[test]
    fn test_vector_records() {
        let t = parse("3\n(\n(0 0 0)\n(1 0 0)\n(0 1 0.5)\n)\n").unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.columns(), 3);
        assert_eq!(t.declared_rows(), Some(3));
        assert_eq!(t.row(2), Some(&[0.0, 1.0, 0.5][..]));
    }

    #[test]
    fn test_scalar_records() {
        // Single-value records come after the count, so they are data.
        let t = parse("2\n(\n1.5\n-2e-3\n)\n").unwrap();
        assert_eq!(t.columns(), 1);
        assert_eq!(t.column(0), Some(vec![1.5, -0.002]));
    }

    #[test]
    fn test_comments_and_preamble_skipped() {
        let text = "// sampled by OpenFOAM\n\
                    // 7 8 9\n\
                    FoamFile 2 3\n\
                    2\n\
                    (\n\
                    // inside\n\
                    (4 5 6)\n\
                    (7 8 9)\n\
                    )\n";
        let t = parse(text).unwrap();
        assert_eq!(t.declared_rows(), Some(2));
        assert_eq!(t.rows(), &[vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]);
    }

    #[test]
    fn test_single_number_comment_is_not_the_count() {
        let t = parse("// 5\n2\n(\n(1 2 3)\n(4 5 6)\n)\n").unwrap();
        assert_eq!(t.declared_rows(), Some(2));
        assert_eq!(t.rows(), &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_numeric_comment_among_records_is_not_a_row() {
        let t = parse("2\n(\n(1 2 3)\n// 9 9 9\n  // 1 2\n(4 5 6)\n)\n").unwrap();
        assert_eq!(t.declared_rows(), Some(2));
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows(), &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_overflowing_value_rejected() {
        let err = parse("2\n(\n(0 0 0)\n(1e999 0 0)\n)\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let t = parse("").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.columns(), 0);

        let t = parse("0\n(\n)\n").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.declared_rows(), Some(0));
    }

    #[test]
    fn test_ragged_record_rejected() {
        let err = parse("2\n(1 2 3)\n(4 5)\n").unwrap_err();
        match err {
            IoError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_count_mismatch_still_parses() {
        let t = parse("5\n(1 2 3)\n").unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.declared_rows(), Some(5));
    }

    #[test]
    fn test_from_rows() {
        let t = Table::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(t.flatten(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(t.column(2).is_none());
        assert!(Table::from_rows(vec![vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_read_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1\n(\n(1 2 3)\n)").unwrap();
        let t = read_table(file.path()).unwrap();
        assert_eq!(t.rows(), &[vec![1.0, 2.0, 3.0]]);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_table("/nonexistent/trisurf/points").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
