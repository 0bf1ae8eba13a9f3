//! Small dense matrix routines
//!
//! Just enough linear algebra for the normal equations and the observed
//! information matrix: a row-major square solve and inverse via Gaussian
//! elimination with partial pivoting. Singular systems surface as model
//! errors.

use crate::error::{AnalysisError, Result};

/// Pivots smaller than this are treated as exact singularity
const PIVOT_TOLERANCE: f64 = 1e-12;

/// A row-major dense matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero matrix
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create an identity matrix
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at (row, col)
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set the value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Add to the value at (row, col)
    pub fn add_to(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] += value;
    }

    /// Solve `self * x = b` for a square system
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        if self.rows != self.cols || b.len() != self.rows {
            return Err(AnalysisError::model(format!(
                "solve requires a square system, got {}x{} with rhs {}",
                self.rows,
                self.cols,
                b.len()
            )));
        }

        let n = self.rows;
        let mut a = self.clone();
        let mut x = b.to_vec();

        for col in 0..n {
            // Partial pivoting
            let mut pivot_row = col;
            let mut pivot_mag = a.get(col, col).abs();
            for row in (col + 1)..n {
                let mag = a.get(row, col).abs();
                if mag > pivot_mag {
                    pivot_row = row;
                    pivot_mag = mag;
                }
            }

            if pivot_mag < PIVOT_TOLERANCE || !pivot_mag.is_finite() {
                return Err(AnalysisError::model(
                    "design matrix is singular or nearly singular",
                ));
            }

            if pivot_row != col {
                for k in 0..n {
                    let tmp = a.get(col, k);
                    a.set(col, k, a.get(pivot_row, k));
                    a.set(pivot_row, k, tmp);
                }
                x.swap(col, pivot_row);
            }

            for row in (col + 1)..n {
                let factor = a.get(row, col) / a.get(col, col);
                if factor == 0.0 {
                    continue;
                }
                for k in col..n {
                    let value = a.get(row, k) - factor * a.get(col, k);
                    a.set(row, k, value);
                }
                x[row] -= factor * x[col];
            }
        }

        // Back substitution
        for col in (0..n).rev() {
            let mut sum = x[col];
            for k in (col + 1)..n {
                sum -= a.get(col, k) * x[k];
            }
            x[col] = sum / a.get(col, col);
        }

        Ok(x)
    }

    /// Invert a square matrix by solving against identity columns
    pub fn inverse(&self) -> Result<Matrix> {
        if self.rows != self.cols {
            return Err(AnalysisError::model(format!(
                "inverse requires a square matrix, got {}x{}",
                self.rows, self.cols
            )));
        }

        let n = self.rows;
        let mut inv = Matrix::zeros(n, n);
        for col in 0..n {
            let mut unit = vec![0.0; n];
            unit[col] = 1.0;
            let solution = self.solve(&unit)?;
            for (row, value) in solution.into_iter().enumerate() {
                inv.set(row, col, value);
            }
        }

        Ok(inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_solve_simple_system() {
        // 2x + y = 5, x + 3y = 10 -> x = 1, y = 3
        let mut m = Matrix::zeros(2, 2);
        m.set(0, 0, 2.0);
        m.set(0, 1, 1.0);
        m.set(1, 0, 1.0);
        m.set(1, 1, 3.0);

        let x = m.solve(&[5.0, 10.0]).unwrap();
        assert_close(x[0], 1.0);
        assert_close(x[1], 3.0);
    }

    #[test]
    fn test_solve_requires_pivoting() {
        // Zero in the leading position forces a row swap
        let mut m = Matrix::zeros(2, 2);
        m.set(0, 0, 0.0);
        m.set(0, 1, 1.0);
        m.set(1, 0, 1.0);
        m.set(1, 1, 0.0);

        let x = m.solve(&[2.0, 3.0]).unwrap();
        assert_close(x[0], 3.0);
        assert_close(x[1], 2.0);
    }

    #[test]
    fn test_singular_matrix_is_an_error() {
        let mut m = Matrix::zeros(2, 2);
        m.set(0, 0, 1.0);
        m.set(0, 1, 2.0);
        m.set(1, 0, 2.0);
        m.set(1, 1, 4.0);

        assert!(m.solve(&[1.0, 2.0]).is_err());
        assert!(m.inverse().is_err());
    }

    #[test]
    fn test_inverse_roundtrip() {
        let mut m = Matrix::zeros(2, 2);
        m.set(0, 0, 4.0);
        m.set(0, 1, 7.0);
        m.set(1, 0, 2.0);
        m.set(1, 1, 6.0);

        let inv = m.inverse().unwrap();
        // m * inv should be identity
        for i in 0..2 {
            for j in 0..2 {
                let mut sum = 0.0;
                for k in 0..2 {
                    sum += m.get(i, k) * inv.get(k, j);
                }
                assert_close(sum, if i == j { 1.0 } else { 0.0 });
            }
        }
    }
}
