//! Matrix computation.
//!
//! - Operations: echo, transpose, flatten, sum, multiply
//! - Pipeline: resolve format, parse, validate, compute

pub mod operations;
pub mod pipeline;

pub use operations::{apply, echo, flatten, multiply, sum, transpose};
pub use pipeline::{format_identifier, MatrixService};
