//! Structural validation applied after parsing.
//!
//! Rectangularity is already guaranteed by the parser, so the only check
//! left before any operation runs is squareness.

use crate::error::{MatrixError, MatrixResult};
use crate::models::Matrix;

/// Ensure the matrix is square (rows = columns).
pub fn validate_square(matrix: &Matrix) -> MatrixResult<()> {
    let rows = matrix.row_count();

    match matrix.rows().iter().find(|row| row.len() != rows) {
        Some(row) => Err(MatrixError::NotSquare {
            rows,
            columns: row.len(),
        }),
        None => Ok(()),
    }
}
