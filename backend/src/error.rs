//! Error types for the matrix pipeline.
//!
//! Errors are layered the same way the pipeline is:
//!
//! - [`ParseError`] - raised by a format parser while turning bytes into a matrix
//! - [`MatrixError`] - the core error: parsing, format resolution, validation, arithmetic
//! - [`ServerError`] - HTTP layer errors, rendered as plain-text responses
//!
//! Conversion is automatic via `From` implementations, so `?` works across
//! layer boundaries. Every message names the row, value, or operation that
//! failed so the condition can be reproduced from the message alone.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::Operation;

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors raised while parsing an uploaded file into a matrix.
///
/// Row numbers are 1-based and count the lines consumed so far.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No bytes, or nothing but a byte-order mark.
    #[error("File is empty")]
    EmptyInput,

    /// A line that is empty or whitespace only.
    #[error("Empty row detected at row {row}")]
    BlankRow { row: usize },

    /// A row whose field count differs from the first row's.
    #[error("Row {row} has inconsistent column count: expected {expected}, found {found}")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A field that is not a 32-bit signed integer.
    #[error("Non-numeric value at row {row}: '{value}'")]
    NonNumeric { row: usize, value: String },

    /// The underlying reader failed before reaching end of input.
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),
}

// =============================================================================
// Core Errors
// =============================================================================

/// Flat error taxonomy, one entry per failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    Structural,
    NonNumericValue,
    ReadFailure,
    UnsupportedFormat,
    NotSquare,
    Overflow,
}

/// Errors from the parse → validate → compute pipeline.
///
/// This is the error type returned by [`crate::transform::MatrixService`].
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No registered parser handles the file's extension.
    #[error("Unsupported file type: '{0}'")]
    UnsupportedFormat(String),

    /// Row count differs from column count.
    #[error(
        "Invalid matrix: matrix must be square (rows must equal columns), \
         found {rows} rows and a row of {columns} columns"
    )]
    NotSquare { rows: usize, columns: usize },

    /// A running sum or product left the `i32` range.
    #[error(
        "Integer overflow occurred while {} matrix elements (at row {row}, column {column})",
        .operation.gerund()
    )]
    Overflow {
        operation: Operation,
        row: usize,
        column: usize,
    },
}

impl MatrixError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::Parse(ParseError::EmptyInput) => ErrorKind::EmptyInput,
            MatrixError::Parse(ParseError::BlankRow { .. })
            | MatrixError::Parse(ParseError::InconsistentRow { .. }) => ErrorKind::Structural,
            MatrixError::Parse(ParseError::NonNumeric { .. }) => ErrorKind::NonNumericValue,
            MatrixError::Parse(ParseError::Read(_)) => ErrorKind::ReadFailure,
            MatrixError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            MatrixError::NotSquare { .. } => ErrorKind::NotSquare,
            MatrixError::Overflow { .. } => ErrorKind::Overflow,
        }
    }

    /// Row the error points at, for structural and numeric failures.
    pub fn row(&self) -> Option<usize> {
        match self {
            MatrixError::Parse(ParseError::BlankRow { row })
            | MatrixError::Parse(ParseError::InconsistentRow { row, .. })
            | MatrixError::Parse(ParseError::NonNumeric { row, .. })
            | MatrixError::Overflow { row, .. } => Some(*row),
            _ => None,
        }
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP layer errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The core rejected the upload.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// The multipart body could not be read.
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Matrix(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Multipart(e) => e.status(),
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for core pipeline operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for HTTP handlers.
pub type ServerResult<T> = Result<T, ServerError>;
