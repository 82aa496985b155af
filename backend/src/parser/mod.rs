//! Format parsers that turn uploaded bytes into a [`Matrix`].
//!
//! Each supported format implements [`MatrixParser`]; a [`ParserRegistry`]
//! picks one by the identifier derived from the upload's file extension.
//!
//! Bytes are decoded before splitting: UTF-8 and UTF-16 byte-order marks are
//! honored, otherwise the encoding is detected with `chardet`.
//!
//! # Example
//! ```ignore
//! use matrixops::{CsvMatrixParser, MatrixParser};
//!
//! let matrix = CsvMatrixParser.parse_bytes(b"1,2\n3,4").unwrap();
//! assert_eq!(matrix.to_string(), "1,2\n3,4");
//! ```

pub mod delimited;
pub mod registry;

pub use delimited::{CsvMatrixParser, TsvMatrixParser};
pub use registry::ParserRegistry;

use encoding_rs::{Encoding, UTF_8};
use std::io::Read;

use crate::error::ParseResult;
use crate::models::Matrix;

/// Strategy for decoding one textual format into a matrix.
pub trait MatrixParser: Send + Sync {
    /// Format identifier this parser handles (e.g. `"CSV"`).
    ///
    /// Compared case-insensitively by the registry.
    fn format_type(&self) -> &'static str;

    /// Read the whole stream and parse it.
    ///
    /// Fails fast on the first structural or numeric error.
    fn parse(&self, reader: &mut dyn Read) -> ParseResult<Matrix>;

    /// Parse an in-memory buffer.
    fn parse_bytes(&self, bytes: &[u8]) -> ParseResult<Matrix> {
        let mut reader = bytes;
        self.parse(&mut reader)
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode uploaded bytes to text.
///
/// A byte-order mark wins; valid UTF-8 is taken as is; anything else goes
/// through detection and, failing that, lossy UTF-8. Never fails: bytes that
/// cannot be decoded end up as replacement characters and are rejected later
/// as non-numeric values.
pub fn decode_content(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return encoding
            .decode_without_bom_handling(&bytes[bom_len..])
            .0
            .into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let label = detect_encoding(bytes);
    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) if encoding != UTF_8 => encoding.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}
