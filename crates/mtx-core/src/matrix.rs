use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult, Op};

const LIFECYCLE: &str = "mtx_core::lifecycle";

/// Dense `f64` matrix stored row-major in a single owned buffer.
///
/// Element `(i, j)` of an `m x n` matrix lives at `data[(i - 1) * n + (j - 1)]`.
/// Indices are 1-based throughout the public API.
///
/// Every matrix built by a constructor or an operation has both dimensions
/// at least 1. The only exception is the empty `0 x 0` state, reachable via
/// [`Matrix::default`] or left behind by [`Matrix::take`].
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> MatrixResult<Self> {
        Matrix::from_vec(raw.rows, raw.columns, raw.data)
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Matrix {
    /// Zero-filled `rows x columns` matrix.
    pub fn new(rows: usize, columns: usize) -> MatrixResult<Self> {
        let len = check_dimensions(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            data: vec![0.0; len],
        })
    }

    pub fn from_vec(rows: usize, columns: usize, data: Vec<f64>) -> MatrixResult<Self> {
        let len = check_dimensions(rows, columns)?;
        if data.len() != len {
            return Err(MatrixError::ElementCount {
                expected: len,
                found: data.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// Build from row slices. All rows must have the same length.
    pub fn from_rows(rows: &[&[f64]]) -> MatrixResult<Self> {
        let columns = rows.first().map_or(0, |r| r.len());
        let len = check_dimensions(rows.len(), columns)?;

        let mut data = Vec::with_capacity(len);
        for row in rows {
            if row.len() != columns {
                return Err(MatrixError::ElementCount {
                    expected: columns,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), columns, data)
    }

    pub fn identity(n: usize) -> MatrixResult<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }
}

/// Element count of a `rows x columns` matrix, or why it cannot exist.
pub(crate) fn check_dimensions(rows: usize, columns: usize) -> MatrixResult<usize> {
    if rows == 0 || columns == 0 {
        return Err(MatrixError::InvalidDimension { rows, columns });
    }
    rows.checked_mul(columns)
        .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<f64>())
        .ok_or(MatrixError::TooLarge { rows, columns })
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl Matrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Number of stored elements. Zero for the empty state.
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Row `row` (1-based) as a slice.
    pub fn row(&self, row: usize) -> MatrixResult<&[f64]> {
        if row == 0 || row > self.rows {
            return Err(self.out_of_bounds(row, 1));
        }
        let start = (row - 1) * self.columns;
        Ok(&self.data[start..start + self.columns])
    }

    pub fn at(&self, row: usize, column: usize) -> MatrixResult<f64> {
        let offset = self.offset(row, column)?;
        Ok(self.data[offset])
    }

    pub fn at_mut(&mut self, row: usize, column: usize) -> MatrixResult<&mut f64> {
        let offset = self.offset(row, column)?;
        Ok(&mut self.data[offset])
    }

    /// Overwrite every element, row-major. `values` must hold exactly
    /// `size()` elements; otherwise the matrix is left untouched.
    pub fn set(&mut self, values: &[f64]) -> MatrixResult<()> {
        if values.len() != self.data.len() {
            return Err(MatrixError::ElementCount {
                expected: self.data.len(),
                found: values.len(),
            });
        }
        self.data.copy_from_slice(values);
        Ok(())
    }

    fn offset(&self, row: usize, column: usize) -> MatrixResult<usize> {
        if row == 0 || column == 0 || row > self.rows || column > self.columns {
            return Err(self.out_of_bounds(row, column));
        }
        Ok((row - 1) * self.columns + (column - 1))
    }

    fn out_of_bounds(&self, row: usize, column: usize) -> MatrixError {
        MatrixError::IndexOutOfBounds {
            row,
            column,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

/// 1-based `(row, column)` indexing. Panics when out of range, like slices do.
impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        match self.offset(row, column) {
            Ok(i) => &self.data[i],
            Err(e) => panic!("{e}"),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        match self.offset(row, column) {
            Ok(i) => &mut self.data[i],
            Err(e) => panic!("{e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl Matrix {
    pub fn checked_add(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        self.zip_with(rhs, Op::Add, |a, b| a + b)
    }

    pub fn checked_sub(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        self.zip_with(rhs, Op::Sub, |a, b| a - b)
    }

    /// Matrix product. Requires `self.columns() == rhs.rows()`; the result
    /// is `self.rows() x rhs.columns()`.
    pub fn checked_mul(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        if self.is_empty() || rhs.is_empty() || self.columns != rhs.rows {
            return Err(self.mismatch(rhs, Op::Mul));
        }

        let mut data = Vec::with_capacity(self.rows * rhs.columns);
        for i in 0..self.rows {
            let lhs_row = &self.data[i * self.columns..(i + 1) * self.columns];
            for j in 0..rhs.columns {
                let sum: f64 = lhs_row
                    .iter()
                    .enumerate()
                    .map(|(k, a)| a * rhs.data[k * rhs.columns + j])
                    .sum();
                data.push(sum);
            }
        }
        Matrix::from_vec(self.rows, rhs.columns, data)
    }

    fn zip_with(&self, rhs: &Matrix, op: Op, f: impl Fn(f64, f64) -> f64) -> MatrixResult<Matrix> {
        if self.is_empty() || self.shape() != rhs.shape() {
            return Err(self.mismatch(rhs, op));
        }
        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix::from_vec(self.rows, self.columns, data)
    }

    fn mismatch(&self, rhs: &Matrix, op: Op) -> MatrixError {
        MatrixError::ShapeMismatch {
            op,
            left: self.shape(),
            right: rhs.shape(),
        }
    }
}

// ---------------------------------------------------------------------------
// Minors and determinant
// ---------------------------------------------------------------------------

impl Matrix {
    /// Copy of `self` without row `i` and column `j` (both 1-based).
    pub fn delete_row_column(&self, i: usize, j: usize) -> MatrixResult<Matrix> {
        self.offset(i, j)?;
        check_dimensions(self.rows - 1, self.columns - 1)?;

        let data = self
            .data
            .chunks_exact(self.columns)
            .enumerate()
            .filter(|(r, _)| r + 1 != i)
            .flat_map(|(_, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |(c, _)| c + 1 != j)
                    .map(|(_, &v)| v)
            })
            .collect();
        Matrix::from_vec(self.rows - 1, self.columns - 1, data)
    }

    /// Determinant by cofactor expansion along the first row. O(n!).
    ///
    /// Every minor is evaluated, so NaN or infinite entries propagate even
    /// where their cofactor is multiplied by zero.
    pub fn determinant(&self) -> MatrixResult<f64> {
        if self.is_empty() {
            return Err(MatrixError::Empty);
        }
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.rows == 1 {
            return Ok(self.data[0]);
        }

        let mut det = 0.0;
        for j in 1..=self.columns {
            let element = self.data[j - 1];
            let sign = if j % 2 == 1 { 1.0 } else { -1.0 };
            det += sign * element * self.delete_row_column(1, j)?.determinant()?;
        }
        Ok(det)
    }
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

impl Matrix {
    /// Move the contents out, leaving `self` as the empty `0 x 0` matrix.
    pub fn take(&mut self) -> Matrix {
        tracing::debug!(target: LIFECYCLE, rows = self.rows, columns = self.columns, "moving matrix");
        std::mem::take(self)
    }
}

impl Clone for Matrix {
    fn clone(&self) -> Self {
        tracing::debug!(target: LIFECYCLE, rows = self.rows, columns = self.columns, "copying matrix");
        Self {
            rows: self.rows,
            columns: self.columns,
            data: self.data.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        tracing::debug!(target: LIFECYCLE, rows = source.rows, columns = source.columns, "copy-assigning matrix");
        self.rows = source.rows;
        self.columns = source.columns;
        self.data.clone_from(&source.data);
    }
}

impl Drop for Matrix {
    fn drop(&mut self) {
        if !self.data.is_empty() {
            tracing::debug!(
                target: LIFECYCLE,
                size = self.size(),
                first_row = ?&self.data[..self.columns],
                "dropping matrix"
            );
        }
    }
}
