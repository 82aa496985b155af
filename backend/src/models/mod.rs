//! Domain models for the matrix pipeline.
//!
//! - [`Matrix`] - Immutable rectangular grid of `i32`, row-major
//! - [`Operation`] - The five operations a request can ask for

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, ParseResult};

// =============================================================================
// Matrix
// =============================================================================

/// A rectangular matrix of 32-bit signed integers.
///
/// Always holds at least one row and every row has the same length.
/// Squareness is not guaranteed here; see [`crate::validation::validate_square`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<i32>>,
}

impl Matrix {
    /// Build a matrix from rows, checking it is non-empty and rectangular.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> ParseResult<Self> {
        let expected = match rows.first() {
            Some(first) => first.len(),
            None => return Err(ParseError::EmptyInput),
        };
        if expected == 0 {
            return Err(ParseError::BlankRow { row: 1 });
        }

        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(ParseError::InconsistentRow {
                row: idx + 1,
                expected,
                found: row.len(),
            });
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the matrix (length of every row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_square(&self) -> bool {
        self.row_count() == self.column_count()
    }

    /// Element at zero-based `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// New matrix where element `(i, j)` is this matrix's `(j, i)`.
    pub fn transpose(&self) -> Matrix {
        let rows = (0..self.column_count())
            .map(|col| self.rows.iter().map(|row| row[col]).collect())
            .collect();
        Matrix { rows }
    }
}

/// Canonical text form: comma-separated columns, newline-separated rows,
/// no trailing newline.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write_joined(f, row.iter())?;
        }
        Ok(())
    }
}

/// Write values separated by commas.
fn write_joined<'a>(
    f: &mut impl fmt::Write,
    values: impl Iterator<Item = &'a i32>,
) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

// =============================================================================
// Operation
// =============================================================================

/// An operation requested on an uploaded matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Return the matrix as received.
    Echo,
    /// Swap rows and columns.
    #[serde(alias = "invert")]
    Transpose,
    /// All elements on one comma-separated line.
    Flatten,
    /// Sum of all elements.
    Sum,
    /// Product of all elements.
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Transpose,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
    ];

    /// Lowercase name, also the HTTP route segment.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Transpose => "transpose",
            Operation::Flatten => "flatten",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::Echo => "Return the matrix exactly as received",
            Operation::Transpose => "Return the transposed matrix (rows become columns)",
            Operation::Flatten => "Return all elements on a single comma-separated line",
            Operation::Sum => "Return the sum of all elements",
            Operation::Multiply => "Return the product of all elements",
        }
    }

    /// Used in error messages ("while summing matrix elements").
    pub fn gerund(&self) -> &'static str {
        match self {
            Operation::Echo => "echoing",
            Operation::Transpose => "transposing",
            Operation::Flatten => "flattening",
            Operation::Sum => "summing",
            Operation::Multiply => "multiplying",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "echo" => Ok(Operation::Echo),
            "transpose" | "invert" => Ok(Operation::Transpose),
            "flatten" => Ok(Operation::Flatten),
            "sum" => Ok(Operation::Sum),
            "multiply" => Ok(Operation::Multiply),
            other => Err(format!(
                "unknown operation '{}' (expected one of: echo, transpose, flatten, sum, multiply)",
                other
            )),
        }
    }
}
