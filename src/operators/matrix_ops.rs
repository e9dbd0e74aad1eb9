//! Matrix algorithms (spec §4.3.2): multiply, determinant, Gauss-Jordan
//! reduced row-echelon form with augmented-matrix support, inverse, cross
//! product, and magnitude/norm. Grounded on the teacher's
//! `values/core_values/array.rs` nested-grid helpers, generalized from
//! fixed-size numeric arrays to the dense `Vec<Vec<Scalar>>` grid
//! `Matrix::to_scalar_grid` produces; every cell is a `Scalar`, promoted
//! across `{BigDecimal, Complex}` per spec §4.3.2 the same way
//! `Scalar::add`/`sub`/`mul`/`div` promote a pairwise operation.

use crate::bigdecimal::BigDecimal;
use crate::error::{CantusError, MathError};
use crate::values::core_values::matrix::Matrix;
use crate::values::core_values::scalar::Scalar;
use crate::values::value::Value;

type Grid = Vec<Vec<Scalar>>;

/// Cells are truncated to 19 digits then rounded to 11 significant digits
/// after Gauss-Jordan elimination, the cleanup spec §4.3.2 calls for to
/// keep compounding rounding error from surfacing in the displayed result.
const TRUNCATE_DIGITS: u32 = 19;
const ROUND_DIGITS: u32 = 11;

fn cleanup(cell: &Scalar) -> Scalar {
    cell.cleanup(TRUNCATE_DIGITS, ROUND_DIGITS)
}

fn dims(grid: &Grid) -> (usize, usize) {
    (grid.len(), grid.first().map(|r| r.len()).unwrap_or(0))
}

pub fn add(a: &Matrix, b: &Matrix) -> Result<Value, CantusError> {
    let (ga, gb) = (a.normalize().to_scalar_grid()?, b.normalize().to_scalar_grid()?);
    if dims(&ga) != dims(&gb) {
        return Err(MathError::IncompatibleMatrixDimensions { lhs: dims(&ga), rhs: dims(&gb) }.into());
    }
    let rows = ga
        .into_iter()
        .zip(gb)
        .map(|(ra, rb)| ra.iter().zip(rb.iter()).map(|(x, y)| x.add(y)).collect())
        .collect();
    Ok(Value::Matrix(Matrix::from_scalar_grid(rows)))
}

/// Standard matrix product (spec §4.3.2): `lhs` rows times `rhs` columns.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Value, CantusError> {
    let ga = a.normalize().to_scalar_grid()?;
    let gb = b.normalize().to_scalar_grid()?;
    let (a_rows, a_cols) = dims(&ga);
    let (b_rows, b_cols) = dims(&gb);
    if a_cols != b_rows {
        return Err(MathError::IncompatibleMatrixDimensions { lhs: (a_rows, a_cols), rhs: (b_rows, b_cols) }.into());
    }
    let mut result = vec![vec![Scalar::zero(); b_cols]; a_rows];
    for i in 0..a_rows {
        for j in 0..b_cols {
            let mut sum = Scalar::zero();
            for k in 0..a_cols {
                sum = sum.add(&ga[i][k].mul(&gb[k][j]));
            }
            result[i][j] = cleanup(&sum);
        }
    }
    Ok(Value::Matrix(Matrix::from_scalar_grid(result)))
}

/// Laplace expansion along the first row; fine for the modest matrix sizes
/// Cantus scripts deal in, and keeps the implementation free of pivoting
/// edge cases `checked_div`'s undefined-on-zero semantics would otherwise
/// need to special-case.
pub fn determinant(m: &Matrix) -> Result<BigDecimal, CantusError> {
    let grid = m.normalize().to_scalar_grid()?;
    let (rows, cols) = dims(&grid);
    if rows != cols {
        return Err(MathError::NonSquareMatrix.into());
    }
    match cleanup(&determinant_grid(&grid)) {
        Scalar::Number(n) => Ok(n),
        Scalar::Complex(_) => Err(MathError::Undefined.into()),
    }
}

fn determinant_grid(grid: &Grid) -> Scalar {
    let n = grid.len();
    if n == 0 {
        return Scalar::one();
    }
    if n == 1 {
        return grid[0][0].clone();
    }
    if n == 2 {
        return grid[0][0].mul(&grid[1][1]).sub(&grid[0][1].mul(&grid[1][0]));
    }
    let mut total = Scalar::zero();
    for col in 0..n {
        let minor: Grid = grid[1..]
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(c, _)| *c != col)
                    .map(|(_, v)| v.clone())
                    .collect()
            })
            .collect();
        let term = grid[0][col].mul(&determinant_grid(&minor));
        total = if col % 2 == 0 { total.add(&term) } else { total.sub(&term) };
    }
    total
}

/// Gauss-Jordan elimination to reduced row-echelon form. `augmented_cols`
/// marks how many trailing columns belong to an augmented side (0 for a
/// bare matrix, `n` for the `n`-identity side used by `inverse`).
pub fn rref(grid: &Grid, _augmented_cols: usize) -> Grid {
    let mut g = grid.clone();
    let rows = g.len();
    let cols = g.first().map(|r| r.len()).unwrap_or(0);
    let mut pivot_row = 0;
    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        let Some(pivot) = (pivot_row..rows).find(|&r| !g[r][col].is_zero()) else {
            continue;
        };
        g.swap(pivot_row, pivot);
        let pivot_value = g[pivot_row][col].clone();
        for cell in g[pivot_row].iter_mut() {
            *cell = cleanup(&cell.div(&pivot_value, 50));
        }
        for r in 0..rows {
            if r == pivot_row {
                continue;
            }
            let factor = g[r][col].clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..cols {
                let subtrahend = factor.mul(&g[pivot_row][c]);
                g[r][c] = cleanup(&g[r][c].sub(&subtrahend));
            }
        }
        pivot_row += 1;
    }
    g
}

/// `matrix ^ -1` via Gauss-Jordan on `[A | I]` (spec §4.3.2).
pub fn inverse(m: &Matrix) -> Result<Value, CantusError> {
    let grid = m.normalize().to_scalar_grid()?;
    let (rows, cols) = dims(&grid);
    if rows != cols {
        return Err(MathError::NonSquareMatrix.into());
    }
    let n = rows;
    let mut augmented: Grid = grid
        .into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            for j in 0..n {
                row.push(if i == j { Scalar::one() } else { Scalar::zero() });
            }
            row
        })
        .collect();
    augmented = rref(&augmented, n);
    let identity_side: Grid = augmented.iter().map(|row| row[..n].to_vec()).collect();
    if identity_side.iter().enumerate().any(|(i, row)| {
        row.iter().enumerate().any(|(j, cell)| {
            let expected = if i == j { Scalar::one() } else { Scalar::zero() };
            cell != &expected
        })
    }) {
        return Err(MathError::Undefined.into());
    }
    let result = augmented.into_iter().map(|row| row[n..].to_vec()).collect();
    Ok(Value::Matrix(Matrix::from_scalar_grid(result)))
}

/// Cross product of two column vectors in R3 (spec §4.3.2).
pub fn cross(a: &Matrix, b: &Matrix) -> Result<Value, CantusError> {
    let ga = a.normalize().to_scalar_grid()?;
    let gb = b.normalize().to_scalar_grid()?;
    let as_r3 = |g: &Grid| -> Option<[Scalar; 3]> {
        if g.len() == 3 && g.iter().all(|r| r.len() == 1) {
            Some([g[0][0].clone(), g[1][0].clone(), g[2][0].clone()])
        } else {
            None
        }
    };
    let (Some([ax, ay, az]), Some([bx, by, bz])) = (as_r3(&ga), as_r3(&gb)) else {
        return Err(MathError::CrossProductRequiresR3.into());
    };
    let cx = ay.mul(&bz).sub(&az.mul(&by));
    let cy = az.mul(&bx).sub(&ax.mul(&bz));
    let cz = ax.mul(&by).sub(&ay.mul(&bx));
    Ok(Value::Matrix(Matrix::from_scalar_grid(vec![vec![cx], vec![cy], vec![cz]])))
}

/// Euclidean norm of every cell, flattened (spec §4.3.2: "magnitude").
/// A `Complex` cell contributes its squared magnitude rather than its
/// square (mirroring the teacher's own norm-of-complex convention so the
/// result stays real-valued even when cells are not).
pub fn norm(m: &Matrix, precision: u32) -> Result<BigDecimal, CantusError> {
    let grid = m.normalize().to_scalar_grid()?;
    let mut sum = BigDecimal::zero();
    for row in &grid {
        for cell in row {
            let squared = match cell {
                Scalar::Number(n) => n.checked_mul(n),
                Scalar::Complex(c) => BigDecimal::from(c.magnitude() * c.magnitude()),
            };
            sum = sum.checked_add(&squared);
        }
    }
    Ok(sum.sqrt(precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::core_values::complex::Complex;
    use crate::values::core_values::matrix::MatrixRow;
    use crate::values::value_container::ValueContainer;

    fn matrix(rows: &[&[i64]]) -> Matrix {
        let grid = rows
            .iter()
            .map(|r| r.iter().map(|&v| BigDecimal::from(v)).collect())
            .collect();
        Matrix::from_decimal_grid(grid)
    }

    fn scalar(value: i64) -> MatrixRow {
        MatrixRow::Scalar(ValueContainer::new_value(Value::Number(BigDecimal::from(value))))
    }

    fn complex_cell(re: f64, im: f64) -> MatrixRow {
        MatrixRow::Scalar(ValueContainer::new_value(Value::Complex(Complex::new(re, im))))
    }

    #[test]
    fn identity_multiply_is_identity() {
        let identity = matrix(&[&[1, 0], &[0, 1]]);
        let a = matrix(&[&[4, 7], &[2, 6]]);
        let product = multiply(&a, &identity).unwrap();
        assert_eq!(product, Value::Matrix(a.clone()));
    }

    #[test]
    fn determinant_2x2() {
        let a = matrix(&[&[4, 7], &[2, 6]]);
        assert_eq!(determinant(&a).unwrap().to_string(), "10");
    }

    #[test]
    fn non_square_determinant_errors() {
        let a = Matrix::new(vec![MatrixRow::Nested(Matrix { rows: vec![scalar(1), scalar(2)], width: 2 })]);
        assert!(determinant(&a).is_err());
    }

    #[test]
    fn cross_product_basis_vectors() {
        let x = matrix(&[&[1], &[0], &[0]]);
        let y = matrix(&[&[0], &[1], &[0]]);
        let z = cross(&x, &y).unwrap();
        assert_eq!(z, Value::Matrix(matrix(&[&[0], &[0], &[1]])));
    }

    #[test]
    fn multiply_promotes_complex_cells() {
        // [[i, 0], [0, 1]] * [[1, 0], [0, 1]] == [[i, 0], [0, 1]]
        let a = Matrix::new(vec![
            MatrixRow::Nested(Matrix { rows: vec![complex_cell(0.0, 1.0), scalar(0)], width: 2 }),
            MatrixRow::Nested(Matrix { rows: vec![scalar(0), scalar(1)], width: 2 }),
        ]);
        let identity = matrix(&[&[1, 0], &[0, 1]]);
        let product = multiply(&a, &identity).unwrap();
        assert_eq!(product, Value::Matrix(a.clone()));
    }

    #[test]
    fn determinant_errors_rather_than_silently_dropping_the_imaginary_part() {
        // det([[i, 0], [0, 1]]) == i, not a real number: the scalar
        // `determinant` signature can't return it, so this surfaces as
        // `MathError::Undefined` instead of truncating to a real value.
        let a = Matrix::new(vec![
            MatrixRow::Nested(Matrix { rows: vec![complex_cell(0.0, 1.0), scalar(0)], width: 2 }),
            MatrixRow::Nested(Matrix { rows: vec![scalar(0), scalar(1)], width: 2 }),
        ]);
        assert!(determinant(&a).is_err());
    }
}
