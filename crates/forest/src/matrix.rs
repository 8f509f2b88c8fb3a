use crate::error::ForestError;
use serde::{Deserialize, Serialize};

/// Row-major dense `f32` matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    pub fn from_vec(n_rows: usize, n_cols: usize, data: Vec<f32>) -> Result<Self, ForestError> {
        let expected = n_rows * n_cols;
        if data.len() != expected {
            return Err(ForestError::InvalidMatrix {
                rows: n_rows,
                cols: n_cols,
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            n_rows,
            n_cols,
            data,
        })
    }

    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![0.0; n_rows * n_cols],
        }
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.n_cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.n_cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// Copy the given rows, in order, into a new matrix.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * self.n_cols);
        for &r in rows {
            data.extend_from_slice(self.row(r));
        }
        Self {
            n_rows: rows.len(),
            n_cols: self.n_cols,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        assert!(Matrix::from_vec(2, 2, vec![1.0; 4]).is_ok());
        assert_eq!(
            Matrix::from_vec(2, 3, vec![1.0; 4]),
            Err(ForestError::InvalidMatrix {
                rows: 2,
                cols: 3,
                expected: 6,
                found: 4
            })
        );
    }

    #[test]
    fn row_access_and_selection() {
        let m = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.get(2, 1), 6.0);

        let picked = m.select_rows(&[2, 0]);
        assert_eq!(picked.shape(), (2, 2));
        assert_eq!(picked.row(0), &[5.0, 6.0]);
        assert_eq!(picked.row(1), &[1.0, 2.0]);
    }

    #[test]
    fn set_writes_in_place() {
        let mut m = Matrix::zeros(1, 3);
        m.set(0, 2, 1.0);
        assert_eq!(m.row(0), &[0.0, 0.0, 1.0]);
    }
}
