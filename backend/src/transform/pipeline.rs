//! Orchestrator for the parse → validate → compute pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use matrixops::{MatrixService, Operation};
//!
//! let service = MatrixService::default();
//! let result = service.run(b"1,2\n3,4", Some("matrix.csv"), Operation::Sum)?;
//! assert_eq!(result, "10");
//! ```

use std::io::Read;
use std::path::Path;

use super::operations::apply;
use crate::api::logs::{log_error, log_info, log_info_indent, log_success};
use crate::error::{MatrixResult, ParseError};
use crate::models::{Matrix, Operation};
use crate::parser::ParserRegistry;
use crate::validation::validate_square;

/// Runs operations on uploaded matrix files.
///
/// Holds only the read-only parser registry, so one instance can be shared
/// across concurrent requests.
#[derive(Debug, Default)]
pub struct MatrixService {
    registry: ParserRegistry,
}

impl MatrixService {
    pub fn new(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Run `operation` on an in-memory upload.
    pub fn run(
        &self,
        bytes: &[u8],
        filename: Option<&str>,
        operation: Operation,
    ) -> MatrixResult<String> {
        let mut reader = bytes;
        self.run_reader(&mut reader, filename, operation)
    }

    /// Run `operation` on a stream; the format comes from `filename`.
    pub fn run_reader(
        &self,
        reader: &mut dyn Read,
        filename: Option<&str>,
        operation: Operation,
    ) -> MatrixResult<String> {
        let result = self
            .load(reader, filename)
            .and_then(|matrix| apply(operation, &matrix));

        match &result {
            Ok(_) => log_success(format!("{} completed", operation)),
            Err(e) => log_error(format!("{} failed: {}", operation, e)),
        }

        result
    }

    /// Run `operation` on a file on disk.
    pub fn run_file(&self, path: &Path, operation: Operation) -> MatrixResult<String> {
        let filename = path.file_name().and_then(|name| name.to_str());
        // Reject unknown formats before touching the filesystem.
        self.registry.resolve(&format_identifier(filename))?;

        let mut file = std::fs::File::open(path).map_err(ParseError::from)?;
        self.run_reader(&mut file, filename, operation)
    }

    /// Resolve, parse and validate, without computing anything.
    pub fn load(&self, reader: &mut dyn Read, filename: Option<&str>) -> MatrixResult<Matrix> {
        let format = format_identifier(filename);
        let parser = self.registry.resolve(&format)?;
        log_info(format!(
            "Parsing '{}' as {}",
            filename.unwrap_or("unknown"),
            parser.format_type()
        ));

        let matrix = parser.parse(reader)?;
        log_info_indent(
            format!("Read {}x{} matrix", matrix.row_count(), matrix.column_count()),
            1,
        );

        validate_square(&matrix)?;
        Ok(matrix)
    }

    pub fn echo(&self, bytes: &[u8], filename: Option<&str>) -> MatrixResult<String> {
        self.run(bytes, filename, Operation::Echo)
    }

    pub fn transpose(&self, bytes: &[u8], filename: Option<&str>) -> MatrixResult<String> {
        self.run(bytes, filename, Operation::Transpose)
    }

    pub fn flatten(&self, bytes: &[u8], filename: Option<&str>) -> MatrixResult<String> {
        self.run(bytes, filename, Operation::Flatten)
    }

    pub fn sum(&self, bytes: &[u8], filename: Option<&str>) -> MatrixResult<String> {
        self.run(bytes, filename, Operation::Sum)
    }

    pub fn multiply(&self, bytes: &[u8], filename: Option<&str>) -> MatrixResult<String> {
        self.run(bytes, filename, Operation::Multiply)
    }
}

/// Format identifier for a filename: the text after the last `.`,
/// uppercased. Empty when there is no filename or no `.`.
pub fn format_identifier(filename: Option<&str>) -> String {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, extension)| extension.to_uppercase())
        .unwrap_or_default()
}
