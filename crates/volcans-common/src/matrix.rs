//! Dense square similarity matrix shared by the loaders and the analogy engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VolcansError};

/// Row-major square matrix of pairwise similarities in [0, 1].
/// Row/column `i` is the volcano at catalogue position `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// All-zero matrix of the given dimension.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![0.0; dim * dim],
        }
    }

    /// Build from nested rows; every row must have as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.len();
        let mut values = Vec::with_capacity(dim * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(VolcansError::MatrixShape(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    dim
                )));
            }
            values.extend(row);
        }
        Ok(Self { dim, values })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.dim + col]
    }

    /// Borrow one row; panics on an out-of-bounds row like slice indexing does.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dim;
        &self.values[start..start + self.dim]
    }

    /// self += weight × other, elementwise.
    pub fn add_scaled(&mut self, other: &SimilarityMatrix, weight: f64) {
        debug_assert_eq!(self.dim, other.dim);
        for (acc, v) in self.values.iter_mut().zip(other.values.iter()) {
            *acc += weight * v;
        }
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.dim).all(|i| {
            (i + 1..self.dim).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }
}
