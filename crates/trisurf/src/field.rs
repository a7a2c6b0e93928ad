//! Field samples attached to surface points.

use trisurf_io::Table;
use trisurf_math::Vec3;

use crate::error::{Result, SurfaceError};

/// Number of components per field sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRank {
    /// One value per point (pressure, temperature, ...).
    Scalar,
    /// Three values per point (velocity, ...).
    Vector,
}

impl FieldRank {
    /// Components per sample.
    pub fn components(self) -> usize {
        match self {
            FieldRank::Scalar => 1,
            FieldRank::Vector => 3,
        }
    }

    /// Rank for a given number of components.
    pub fn from_components(n: usize) -> Result<Self> {
        match n {
            1 => Ok(FieldRank::Scalar),
            3 => Ok(FieldRank::Vector),
            n => Err(SurfaceError::InvalidFieldRank(n)),
        }
    }
}

/// One field sample per surface point, in point order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTable {
    rank: FieldRank,
    /// Row-major samples, `rank.components()` values each.
    values: Vec<f64>,
}

impl FieldTable {
    /// Scalar field.
    pub fn scalar(values: Vec<f64>) -> Self {
        Self {
            rank: FieldRank::Scalar,
            values,
        }
    }

    /// Vector field.
    pub fn vector(values: &[Vec3]) -> Self {
        Self {
            rank: FieldRank::Vector,
            values: values.iter().flat_map(|v| [v.x, v.y, v.z]).collect(),
        }
    }

    /// Field from rows of equal width (1 or 3). The rank is taken from the
    /// row width.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let rank = FieldRank::from_components(width)?;
        if let Some(row) = rows.iter().find(|r| r.len() != width) {
            return Err(SurfaceError::InvalidFieldRank(row.len()));
        }
        Ok(Self {
            rank,
            values: rows.iter().flatten().copied().collect(),
        })
    }

    /// Field from a parsed foamFile table.
    pub fn from_table(table: &Table) -> Result<Self> {
        Self::from_rows(table.rows())
    }

    /// Scalar or vector.
    pub fn rank(&self) -> FieldRank {
        self.rank
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len() / self.rank.components()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Components of sample `i`.
    pub fn sample(&self, i: usize) -> Option<&[f64]> {
        let n = self.rank.components();
        self.values.get(i * n..(i + 1) * n)
    }

    /// All values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The samples of a scalar field.
    pub fn scalars(&self) -> Option<&[f64]> {
        (self.rank == FieldRank::Scalar).then_some(self.values.as_slice())
    }

    /// The samples of a vector field.
    pub fn vectors(&self) -> Option<Vec<Vec3>> {
        (self.rank == FieldRank::Vector).then(|| {
            self.values
                .chunks_exact(3)
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect()
        })
    }
}
