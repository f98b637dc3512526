//! Dense row-major feature matrix.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UjaranError};

/// A dense `n_rows × n_cols` matrix of `f64`, stored row-major.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl FeatureMatrix {
    /// Create a zero-filled matrix.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        FeatureMatrix {
            data: vec![0.0; n_rows * n_cols],
            n_rows,
            n_cols,
        }
    }

    /// Build a matrix from rows that all have `n_cols` entries.
    ///
    /// `n_cols` is explicit so that a matrix with no rows still has a width.
    pub fn from_rows(rows: Vec<Vec<f64>>, n_cols: usize) -> Result<Self> {
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(UjaranError::dimension(n_cols, row.len()));
            }
            data.extend(row);
        }
        Ok(FeatureMatrix {
            data,
            n_rows,
            n_cols,
        })
    }

    /// Number of rows (documents).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns (features).
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Check whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Borrow row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_rows`.
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// Mutably borrow row `index`.
    pub fn row_mut(&mut self, index: usize) -> &mut [f64] {
        let start = index * self.n_cols;
        &mut self.data[start..start + self.n_cols]
    }

    /// Iterate over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// Value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n_cols + col]
    }

    /// All values, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copy the given rows, in the given order, into a new matrix.
    pub fn select_rows(&self, indices: &[usize]) -> FeatureMatrix {
        let mut data = Vec::with_capacity(indices.len() * self.n_cols);
        for &index in indices {
            data.extend_from_slice(self.row(index));
        }
        FeatureMatrix {
            data,
            n_rows: indices.len(),
            n_cols: self.n_cols,
        }
    }

    /// Convert into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}
