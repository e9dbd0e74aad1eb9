//! `Value::Matrix` (spec §3: "ordered sequence of rows, each row is
//! either a scalar Reference or a nested Matrix; carries an explicit
//! width enforced by a normalization pass"), grounded on the teacher's
//! nested-array handling in `values/core_values/array.rs`.

use std::fmt;

use crate::bigdecimal::BigDecimal;
use crate::error::{CantusError, MathError};
use crate::values::core_values::scalar::Scalar;
use crate::values::value::Value;
use crate::values::value_container::ValueContainer;

#[derive(Debug, Clone, PartialEq)]
pub enum MatrixRow {
    Scalar(ValueContainer),
    Nested(Matrix),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: Vec<MatrixRow>,
    pub width: usize,
}

fn zero_cell() -> ValueContainer {
    ValueContainer::new_value(Value::Number(BigDecimal::zero()))
}

impl Matrix {
    pub fn new(rows: Vec<MatrixRow>) -> Self {
        Matrix { rows, width: 0 }.normalize()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    fn row_len(row: &MatrixRow) -> usize {
        match row {
            MatrixRow::Scalar(_) => 1,
            MatrixRow::Nested(m) => m.width,
        }
    }

    fn pad_row(row: MatrixRow, width: usize) -> MatrixRow {
        match row {
            MatrixRow::Scalar(cell) => {
                if width <= 1 {
                    MatrixRow::Scalar(cell)
                } else {
                    let mut cells = vec![MatrixRow::Scalar(cell)];
                    cells.extend((1..width).map(|_| MatrixRow::Scalar(zero_cell())));
                    MatrixRow::Nested(Matrix { rows: cells, width })
                }
            }
            MatrixRow::Nested(mut nested) => {
                while nested.rows.len() < width {
                    nested.rows.push(MatrixRow::Scalar(zero_cell()));
                }
                nested.width = width;
                MatrixRow::Nested(nested)
            }
        }
    }

    /// Pads short rows with zero cells and wraps bare scalar rows into
    /// single-cell nested rows so every row reaches the matrix's width
    /// (spec §3 invariant; spec §8 property 4, idempotent).
    pub fn normalize(&self) -> Matrix {
        let normalized_rows: Vec<MatrixRow> = self
            .rows
            .iter()
            .map(|row| match row {
                MatrixRow::Scalar(v) => MatrixRow::Scalar(v.clone()),
                MatrixRow::Nested(m) => MatrixRow::Nested(m.normalize()),
            })
            .collect();
        let width = normalized_rows.iter().map(Self::row_len).max().unwrap_or(0);
        let rows = normalized_rows.into_iter().map(|row| Self::pad_row(row, width)).collect();
        Matrix { rows, width }
    }

    pub fn is_square(&self) -> bool {
        self.height() == self.width
    }

    pub fn deep_copy(&self) -> Matrix {
        let rows = self
            .rows
            .iter()
            .map(|row| match row {
                MatrixRow::Scalar(cell) => MatrixRow::Scalar(cell.deep_copy()),
                MatrixRow::Nested(nested) => MatrixRow::Nested(nested.deep_copy()),
            })
            .collect();
        Matrix { rows, width: self.width }
    }

    /// Flattens a normalized matrix into a dense `Scalar` grid for the
    /// numeric algorithms in `operators::matrix_ops`, which promote across
    /// `{BigDecimal, Complex}` per spec §4.3.2.
    pub fn to_scalar_grid(&self) -> Result<Vec<Vec<Scalar>>, CantusError> {
        self.rows
            .iter()
            .map(|row| match row {
                MatrixRow::Scalar(cell) => {
                    let value = cell.to_value().ok_or(MathError::Undefined)?;
                    Scalar::from_value(value).map(|s| vec![s]).ok_or_else(|| MathError::Undefined.into())
                }
                MatrixRow::Nested(nested) => nested.row_to_scalars(),
            })
            .collect()
    }

    fn row_to_scalars(&self) -> Result<Vec<Scalar>, CantusError> {
        self.rows
            .iter()
            .map(|cell| match cell {
                MatrixRow::Scalar(cell) => {
                    let value = cell.to_value().ok_or(MathError::Undefined)?;
                    Scalar::from_value(value).ok_or_else(|| MathError::Undefined.into())
                }
                MatrixRow::Nested(_) => Err(MathError::Undefined.into()),
            })
            .collect()
    }

    pub fn from_scalar_grid(grid: Vec<Vec<Scalar>>) -> Matrix {
        let rows = grid
            .into_iter()
            .map(|row| {
                let cells = row
                    .into_iter()
                    .map(|s| MatrixRow::Scalar(ValueContainer::new_value(s.into_value())))
                    .collect();
                MatrixRow::Nested(Matrix { width: 0, rows: cells }.normalize())
            })
            .collect();
        Matrix { rows, width: 0 }.normalize()
    }

    /// Flattens a normalized matrix into a dense `BigDecimal` grid. Errors
    /// on any `Complex` cell; callers that need to support both promoted
    /// types should use `to_scalar_grid` instead.
    pub fn to_decimal_grid(&self) -> Result<Vec<Vec<BigDecimal>>, CantusError> {
        self.rows
            .iter()
            .map(|row| match row {
                MatrixRow::Scalar(cell) => {
                    let value = cell.to_value().ok_or(MathError::Undefined)?;
                    match value {
                        Value::Number(n) => Ok(vec![n]),
                        _ => Err(MathError::Undefined.into()),
                    }
                }
                MatrixRow::Nested(nested) => nested.row_to_decimals(),
            })
            .collect()
    }

    fn row_to_decimals(&self) -> Result<Vec<BigDecimal>, CantusError> {
        self.rows
            .iter()
            .map(|cell| match cell {
                MatrixRow::Scalar(cell) => {
                    let value = cell.to_value().ok_or(MathError::Undefined)?;
                    match value {
                        Value::Number(n) => Ok(n),
                        _ => Err(MathError::Undefined.into()),
                    }
                }
                MatrixRow::Nested(_) => Err(MathError::Undefined.into()),
            })
            .collect()
    }

    pub fn from_decimal_grid(grid: Vec<Vec<BigDecimal>>) -> Matrix {
        let rows = grid
            .into_iter()
            .map(|row| {
                let cells = row
                    .into_iter()
                    .map(|n| MatrixRow::Scalar(ValueContainer::new_value(Value::Number(n))))
                    .collect();
                MatrixRow::Nested(Matrix { width: 0, rows: cells }.normalize())
            })
            .collect();
        Matrix { rows, width: 0 }.normalize()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match row {
                MatrixRow::Scalar(cell) => write!(f, "{cell}")?,
                MatrixRow::Nested(nested) => write!(f, "{nested}")?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_row(values: &[i64]) -> MatrixRow {
        let cells = values
            .iter()
            .map(|v| MatrixRow::Scalar(ValueContainer::new_value(Value::Number(BigDecimal::from(*v)))))
            .collect();
        MatrixRow::Nested(Matrix { rows: cells, width: 0 }.normalize())
    }

    #[test]
    fn normalize_is_idempotent() {
        let m = Matrix::new(vec![scalar_row(&[1, 2]), scalar_row(&[3])]);
        let once = m.normalize();
        let twice = once.normalize();
        assert_eq!(once, twice);
        assert!(once.rows.iter().all(|r| Matrix::row_len(r) == once.width));
    }

    #[test]
    fn bare_scalar_row_is_wrapped_and_padded() {
        let m = Matrix::new(vec![
            MatrixRow::Scalar(ValueContainer::new_value(Value::Number(BigDecimal::from(9)))),
            scalar_row(&[1, 2]),
        ]);
        assert_eq!(m.width, 2);
        assert_eq!(m.height(), 2);
    }
}
