//! The five matrix operations.
//!
//! Every function here expects a matrix that already passed
//! [`crate::validation::validate_square`]. Sum and product accumulate in
//! `i64` and narrow back to `i32` after every element, in row-major order,
//! so an overflow is reported at the first partial result that leaves the
//! `i32` range. Values exactly at `i32::MIN` or `i32::MAX` are accepted.

use crate::error::{MatrixError, MatrixResult};
use crate::models::{Matrix, Operation};

/// Run `operation` on `matrix` and format the result.
pub fn apply(operation: Operation, matrix: &Matrix) -> MatrixResult<String> {
    match operation {
        Operation::Echo => Ok(echo(matrix)),
        Operation::Transpose => Ok(transpose(matrix)),
        Operation::Flatten => Ok(flatten(matrix)),
        Operation::Sum => sum(matrix).map(|total| total.to_string()),
        Operation::Multiply => multiply(matrix).map(|product| product.to_string()),
    }
}

/// Matrix as received: comma-separated columns, newline-separated rows.
pub fn echo(matrix: &Matrix) -> String {
    matrix.to_string()
}

/// Transposed matrix, formatted like [`echo`].
pub fn transpose(matrix: &Matrix) -> String {
    matrix.transpose().to_string()
}

/// All elements in row-major order on one comma-separated line.
pub fn flatten(matrix: &Matrix) -> String {
    matrix
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Sum of all elements.
pub fn sum(matrix: &Matrix) -> MatrixResult<i32> {
    accumulate(matrix, Operation::Sum, 0, |acc, value| acc + value)
}

/// Product of all elements.
pub fn multiply(matrix: &Matrix) -> MatrixResult<i32> {
    accumulate(matrix, Operation::Multiply, 1, |acc, value| acc * value)
}

/// Fold in row-major order, narrowing to `i32` after each step.
///
/// Both operands of `step` are always within the `i32` range, so the `i64`
/// result of one addition or multiplication is exact.
fn accumulate(
    matrix: &Matrix,
    operation: Operation,
    seed: i32,
    step: impl Fn(i64, i64) -> i64,
) -> MatrixResult<i32> {
    let mut acc = seed;

    for (r, row) in matrix.rows().iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let wide = step(i64::from(acc), i64::from(value));
            acc = i32::try_from(wide).map_err(|_| MatrixError::Overflow {
                operation,
                row: r + 1,
                column: c + 1,
            })?;
        }
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn matrix(rows: &[&[i32]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn three_by_three() -> Matrix {
        matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]])
    }

    #[test]
    fn test_one_by_one() {
        let m = matrix(&[&[5]]);
        for op in Operation::ALL {
            assert_eq!(apply(op, &m).unwrap(), "5", "{op}");
        }
    }

    #[test]
    fn test_three_by_three() {
        let m = three_by_three();
        assert_eq!(echo(&m), "1,2,3\n4,5,6\n7,8,9");
        assert_eq!(transpose(&m), "1,4,7\n2,5,8\n3,6,9");
        assert_eq!(flatten(&m), "1,2,3,4,5,6,7,8,9");
        assert_eq!(apply(Operation::Sum, &m).unwrap(), "45");
        assert_eq!(apply(Operation::Multiply, &m).unwrap(), "362880");
    }

    #[test]
    fn test_negative_numbers() {
        let m = matrix(&[&[-1, -2, -3], &[-4, -5, -6], &[-7, -8, -9]]);
        assert_eq!(sum(&m).unwrap(), -45);
        assert_eq!(multiply(&m).unwrap(), -362880);
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let m = matrix(&[&[1, -2, 3], &[0, 5, 60], &[7, 8, -9]]);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(transpose(&m.transpose()), echo(&m));
    }

    #[test]
    fn test_flatten_matches_echo_values() {
        let m = matrix(&[&[10, -20], &[30, 0]]);
        assert_eq!(flatten(&m), echo(&m).replace('\n', ","));
    }

    #[test]
    fn test_sum_order_independent() {
        let a = matrix(&[&[1, 2], &[3, 4]]);
        let b = matrix(&[&[4, 3], &[2, 1]]);
        assert_eq!(sum(&a).unwrap(), sum(&b).unwrap());
        assert_eq!(multiply(&a).unwrap(), multiply(&b).unwrap());
    }

    #[test]
    fn test_sum_at_max_boundary_allowed() {
        let m = matrix(&[&[i32::MAX, 0], &[0, 0]]);
        assert_eq!(sum(&m).unwrap(), i32::MAX);
    }

    #[test]
    fn test_sum_at_min_boundary_allowed() {
        let m = matrix(&[&[i32::MIN, 0], &[0, 0]]);
        assert_eq!(sum(&m).unwrap(), i32::MIN);
    }

    #[test]
    fn test_sum_overflow() {
        let m = matrix(&[&[i32::MAX, 1], &[1, 1]]);
        let err = sum(&m).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        match err {
            MatrixError::Overflow { operation, row, column } => {
                assert_eq!(operation, Operation::Sum);
                assert_eq!((row, column), (1, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sum_overflow_reported_at_first_excursion() {
        // The total would fit again after the last element, but the running
        // value leaves the range at row 2, column 1 first.
        let m = matrix(&[&[i32::MAX, 0], &[1, -1]]);
        let err = sum(&m).unwrap_err();
        assert_eq!(err.row(), Some(2));
    }

    #[test]
    fn test_sum_negative_overflow() {
        let m = matrix(&[&[i32::MIN, -1], &[0, 0]]);
        assert!(matches!(sum(&m), Err(MatrixError::Overflow { .. })));
    }

    #[test]
    fn test_multiply_overflow() {
        let m = matrix(&[&[i32::MAX, 2], &[1, 1]]);
        let err = multiply(&m).unwrap_err();
        assert!(err.to_string().contains("multiplying"));
    }

    #[test]
    fn test_multiply_large_negative_overflow() {
        let m = matrix(&[&[-100_000, 100_000], &[1, 1]]);
        assert!(matches!(
            multiply(&m),
            Err(MatrixError::Overflow { operation: Operation::Multiply, row: 1, column: 2 })
        ));
    }

    #[test]
    fn test_multiply_min_times_minus_one_overflows() {
        let m = matrix(&[&[i32::MIN, -1], &[1, 1]]);
        assert!(multiply(&m).is_err());
    }

    #[test]
    fn test_multiply_with_zero() {
        let m = matrix(&[&[0, 2], &[3, 4]]);
        assert_eq!(multiply(&m).unwrap(), 0);

        // Once zero, large factors cannot overflow.
        let m = matrix(&[&[0, i32::MAX], &[i32::MAX, i32::MIN]]);
        assert_eq!(multiply(&m).unwrap(), 0);
    }

    #[test]
    fn test_multiply_zero_after_overflow_still_fails() {
        let m = matrix(&[&[i32::MAX, 2], &[0, 1]]);
        assert!(multiply(&m).is_err());
    }

    #[test]
    fn test_multiply_sign_flips() {
        let m = matrix(&[&[-2, 3], &[-4, -1]]);
        assert_eq!(multiply(&m).unwrap(), -24);
    }

    #[test]
    fn test_multiply_reaches_min_exactly() {
        // -2^31 is representable
        let m = matrix(&[&[-65536, 32768], &[1, 1]]);
        assert_eq!(multiply(&m).unwrap(), i32::MIN);
    }

    #[test]
    fn test_five_by_five_product_overflows() {
        let rows: Vec<Vec<i32>> = (0..5)
            .map(|r| (1..=5).map(|c| r * 5 + c).collect())
            .collect();
        let m = Matrix::from_rows(rows).unwrap();
        assert_eq!(sum(&m).unwrap(), 325);
        assert!(multiply(&m).is_err());
    }
}
