//! Parser Registry - resolve a format identifier to its parser.
//!
//! Built once at startup and read-only afterwards, so it can be shared
//! between requests without locking.

use std::collections::HashMap;

use super::{CsvMatrixParser, MatrixParser, TsvMatrixParser};
use crate::api::logs::log_warning;
use crate::error::{MatrixError, MatrixResult};

/// Immutable lookup of parsers keyed by uppercased format identifier.
pub struct ParserRegistry {
    parsers: HashMap<String, Box<dyn MatrixParser>>,
}

impl ParserRegistry {
    /// Build a registry from the given parsers.
    ///
    /// When two parsers report the same identifier (case-insensitively), the
    /// one registered last wins and a warning is logged.
    pub fn new(parsers: Vec<Box<dyn MatrixParser>>) -> Self {
        let mut map: HashMap<String, Box<dyn MatrixParser>> = HashMap::new();

        for parser in parsers {
            let key = parser.format_type().to_uppercase();
            if map.insert(key.clone(), parser).is_some() {
                log_warning(format!(
                    "Duplicate parser for format '{}': the last registered parser wins",
                    key
                ));
            }
        }

        Self { parsers: map }
    }

    /// Registry with every built-in format (CSV, TSV).
    pub fn with_default_parsers() -> Self {
        Self::new(vec![Box::new(CsvMatrixParser), Box::new(TsvMatrixParser)])
    }

    /// Find the parser for `format`, compared case-insensitively.
    ///
    /// The empty identifier (a file without extension) never matches.
    pub fn resolve(&self, format: &str) -> MatrixResult<&dyn MatrixParser> {
        self.parsers
            .get(&format.to_uppercase())
            .map(|parser| parser.as_ref())
            .ok_or_else(|| MatrixError::UnsupportedFormat(format.to_string()))
    }

    /// Registered identifiers, sorted.
    pub fn formats(&self) -> Vec<&str> {
        let mut formats: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        formats.sort_unstable();
        formats
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_default_parsers()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ParseResult};
    use crate::models::Matrix;
    use std::io::Read;

    /// Parser that ignores its input and returns a fixed 1x1 matrix.
    struct FixedParser {
        format: &'static str,
        value: i32,
    }

    impl MatrixParser for FixedParser {
        fn format_type(&self) -> &'static str {
            self.format
        }

        fn parse(&self, _reader: &mut dyn Read) -> ParseResult<Matrix> {
            Matrix::from_rows(vec![vec![self.value]])
        }
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let registry = ParserRegistry::with_default_parsers();
        assert_eq!(registry.resolve("csv").unwrap().format_type(), "CSV");
        assert_eq!(registry.resolve("Csv").unwrap().format_type(), "CSV");
        assert_eq!(registry.resolve("TSV").unwrap().format_type(), "TSV");
    }

    #[test]
    fn test_unsupported_format() {
        let registry = ParserRegistry::default();
        let Err(err) = registry.resolve("txt") else {
            panic!("TXT should not resolve");
        };
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(err.to_string().contains("txt"));
    }

    #[test]
    fn test_empty_identifier_unsupported() {
        let registry = ParserRegistry::default();
        let Err(err) = registry.resolve("") else {
            panic!("an empty identifier should not resolve");
        };
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_lowercase_identifier_is_normalized() {
        let registry = ParserRegistry::new(vec![Box::new(FixedParser { format: "mat", value: 1 })]);
        assert_eq!(registry.formats(), vec!["MAT"]);
        assert!(registry.resolve("MAT").is_ok());
    }

    #[test]
    fn test_duplicate_last_registered_wins() {
        let registry = ParserRegistry::new(vec![
            Box::new(FixedParser { format: "CSV", value: 1 }),
            Box::new(FixedParser { format: "csv", value: 2 }),
        ]);

        assert_eq!(registry.len(), 1);
        let matrix = registry.resolve("csv").unwrap().parse_bytes(b"").unwrap();
        assert_eq!(matrix.rows(), &[vec![2]]);
    }

    #[test]
    fn test_formats_sorted() {
        let registry = ParserRegistry::with_default_parsers();
        assert_eq!(registry.formats(), vec!["CSV", "TSV"]);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ParserRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.resolve("csv").is_err());
    }
}
