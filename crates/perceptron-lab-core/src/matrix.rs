use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense sample matrix: one row per sample, one column per feature.
///
/// Stores data in a flat contiguous `Vec<f64>` with row-major layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct MatrixRepr {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = LabError;

    fn try_from(repr: MatrixRepr) -> LabResult<Self> {
        Matrix::new(repr.data, repr.rows, repr.cols)
    }
}

// ─── Construction ───────────────────────────────────────────────────────────

impl Matrix {
    /// Create a matrix from raw row-major data.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> LabResult<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(LabError::ShapeOverflow { rows, cols })?;
        if data.len() != expected {
            return Err(LabError::ShapeMismatch {
                rows,
                cols,
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Empty matrix with a fixed feature count.
    pub fn empty(cols: usize) -> Self {
        Matrix::zeros(0, cols)
    }

    /// Build from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> LabResult<Self> {
        let Some(first) = rows.first() else {
            return Ok(Matrix::empty(0));
        };
        let cols = first.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(LabError::DimensionMismatch {
                expected: cols,
                got: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix::new(flat, rows.len(), cols)
    }

    /// Build a two-feature matrix from points.
    pub fn from_points(points: &[[f64; 2]]) -> Self {
        Matrix {
            data: points.iter().flat_map(|p| p.iter().copied()).collect(),
            rows: points.len(),
            cols: 2,
        }
    }
}

// ─── Access ─────────────────────────────────────────────────────────────────

impl Matrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Borrow row `i`. Panics if `i` is out of bounds, like slice indexing.
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Copy out column `j`.
    pub fn col(&self, j: usize) -> LabResult<Vec<f64>> {
        if j >= self.cols {
            return Err(LabError::DimensionMismatch {
                expected: self.cols,
                got: j + 1,
            });
        }
        Ok(self.iter_rows().map(|r| r[j]).collect())
    }

    /// Gather the given rows, in the given order, into a new matrix.
    pub fn select_rows(&self, indices: &[usize]) -> Matrix {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &idx in indices {
            data.extend_from_slice(self.row(idx));
        }
        Matrix {
            data,
            rows: indices.len(),
            cols: self.cols,
        }
    }

    /// Apply a function to every element, passing the column index.
    pub fn map_cols<F>(&self, f: F) -> Matrix
    where
        F: Fn(usize, f64) -> f64,
    {
        let cols = self.cols;
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(k, &v)| f(k % cols, v))
            .collect();
        Matrix {
            data,
            rows: self.rows,
            cols,
        }
    }

    pub fn to_vec2d(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}

// ─── Column statistics ──────────────────────────────────────────────────────

impl Matrix {
    /// Per-column mean.
    pub fn mean_axis0(&self) -> LabResult<Vec<f64>> {
        if self.is_empty() {
            return Err(LabError::EmptyInput("mean of a matrix with no rows"));
        }
        let n = self.rows as f64;
        let mut sums = vec![0.0; self.cols];
        for row in self.iter_rows() {
            for (s, v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        Ok(sums.into_iter().map(|s| s / n).collect())
    }

    /// Per-column population standard deviation (divides by `n`).
    pub fn std_axis0(&self) -> LabResult<Vec<f64>> {
        let mean = self.mean_axis0()?;
        let n = self.rows as f64;
        let mut sq = vec![0.0; self.cols];
        for row in self.iter_rows() {
            for ((s, v), m) in sq.iter_mut().zip(row).zip(&mean) {
                *s += (v - m).powi(2);
            }
        }
        Ok(sq.into_iter().map(|s| (s / n).sqrt()).collect())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "matrix({}x{}, [", self.rows, self.cols)?;
        for (i, row) in self.iter_rows().enumerate() {
            if i >= 6 {
                writeln!(f, "  ...")?;
                break;
            }
            let cells: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
            writeln!(f, "  [{}],", cells.join(", "))?;
        }
        write!(f, "])")
    }
}
