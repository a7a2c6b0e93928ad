//! Typed readers for the points, faces and field files of a sampled surface.

use std::path::Path;

use tracing::debug;
use trisurf_math::Point3;

use crate::error::{IoError, Result};
use crate::table::{read_table, Table};

/// Vertices per face. Only triangulated surfaces are read.
const FACE_VERTICES: usize = 3;

fn require_records(table: &Table) -> Result<()> {
    if table.is_empty() {
        Err(IoError::EmptyTable)
    } else {
        Ok(())
    }
}

/// Convert a 3-column table into points.
pub fn points_from_table(table: &Table) -> Result<Vec<Point3>> {
    require_records(table)?;
    if table.columns() != 3 {
        return Err(IoError::ColumnCount {
            expected: "3".into(),
            found: table.columns(),
        });
    }
    Ok(table
        .rows()
        .iter()
        .map(|r| Point3::new(r[0], r[1], r[2]))
        .collect())
}

/// Convert a face table into vertex index triples.
///
/// Each record is `n i j k` where `n` is the vertex count and must be 3.
pub fn faces_from_table(table: &Table) -> Result<Vec<[usize; 3]>> {
    require_records(table)?;
    if table.columns() != FACE_VERTICES + 1 {
        return Err(IoError::ColumnCount {
            expected: (FACE_VERTICES + 1).to_string(),
            found: table.columns(),
        });
    }

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, r)| {
            if r[0] != FACE_VERTICES as f64 {
                return Err(IoError::invalid_face(
                    row,
                    format!("face has {} vertices, only triangles are supported", r[0]),
                ));
            }
            let mut face = [0usize; 3];
            for (slot, &v) in face.iter_mut().zip(&r[1..]) {
                if v < 0.0 || v.fract() != 0.0 {
                    return Err(IoError::invalid_face(
                        row,
                        format!("'{v}' is not a vertex index"),
                    ));
                }
                *slot = v as usize;
            }
            Ok(face)
        })
        .collect()
}

/// Read a points file: one `(x y z)` record per point.
pub fn read_points(path: impl AsRef<Path>) -> Result<Vec<Point3>> {
    let points = points_from_table(&read_table(path)?)?;
    debug!(count = points.len(), "read points");
    Ok(points)
}

/// Read a faces file: one `3(i j k)` record per triangle.
pub fn read_faces(path: impl AsRef<Path>) -> Result<Vec<[usize; 3]>> {
    let faces = faces_from_table(&read_table(path)?)?;
    debug!(count = faces.len(), "read faces");
    Ok(faces)
}

/// Read a field file holding scalar (1 column) or vector (3 column) samples.
pub fn read_field(path: impl AsRef<Path>) -> Result<Table> {
    let table = read_table(path)?;
    require_records(&table)?;
    match table.columns() {
        1 | 3 => {
            debug!(count = table.len(), rank = table.columns(), "read field");
            Ok(table)
        }
        found => Err(IoError::ColumnCount {
            expected: "1 or 3".into(),
            found,
        }),
    }
}

/// Read a VTK surface. Not supported; always returns
/// [`IoError::UnsupportedFormat`].
pub fn read_vtk(path: impl AsRef<Path>) -> Result<Table> {
    Err(IoError::UnsupportedFormat(format!(
        "VTK input ({}) is not supported, use the foamFile writer",
        path.as_ref().display()
    )))
}
