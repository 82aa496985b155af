//! Delimited-text parsers (CSV, TSV).
//!
//! One line per row, no header, no quoting. Rows end at `\n`, `\r\n` or a
//! lone `\r`. Trailing empty fields are dropped, interior ones are not.
//! Fields are trimmed of ASCII control characters and spaces before integer
//! parsing. Blank lines are rejected rather than skipped, and the first row
//! fixes the expected width.

use std::io::Read;

use super::{decode_content, MatrixParser};
use crate::error::{ParseError, ParseResult};
use crate::models::Matrix;

/// Comma-separated matrix files (`.csv`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvMatrixParser;

impl MatrixParser for CsvMatrixParser {
    fn format_type(&self) -> &'static str {
        "CSV"
    }

    fn parse(&self, reader: &mut dyn Read) -> ParseResult<Matrix> {
        parse_delimited(reader, ',')
    }
}

/// Tab-separated matrix files (`.tsv`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvMatrixParser;

impl MatrixParser for TsvMatrixParser {
    fn format_type(&self) -> &'static str {
        "TSV"
    }

    fn parse(&self, reader: &mut dyn Read) -> ParseResult<Matrix> {
        parse_delimited(reader, '\t')
    }
}

/// Shared line/field rules for every delimited format.
fn parse_delimited(reader: &mut dyn Read, delimiter: char) -> ParseResult<Matrix> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let content = decode_content(&bytes);
    let mut rows: Vec<Vec<i32>> = Vec::new();
    let mut expected_columns: Option<usize> = None;

    for (idx, line) in split_rows(&content).into_iter().enumerate() {
        let row = idx + 1;

        if trim_field(line).is_empty() {
            return Err(ParseError::BlankRow { row });
        }

        let mut fields: Vec<&str> = line.split(delimiter).collect();
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }

        match expected_columns {
            None => expected_columns = Some(fields.len()),
            Some(expected) if expected != fields.len() => {
                return Err(ParseError::InconsistentRow {
                    row,
                    expected,
                    found: fields.len(),
                });
            }
            Some(_) => {}
        }

        let values = fields
            .iter()
            .map(|field| {
                trim_field(field).parse::<i32>().map_err(|_| ParseError::NonNumeric {
                    row,
                    value: field.to_string(),
                })
            })
            .collect::<ParseResult<Vec<i32>>>()?;

        rows.push(values);
    }

    // Empty when the input was nothing but a byte-order mark.
    Matrix::from_rows(rows)
}

/// Split on `\n`, `\r\n` and lone `\r`. A final terminator does not open
/// another row.
fn split_rows(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut rows = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                rows.push(&content[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                rows.push(&content[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < content.len() {
        rows.push(&content[start..]);
    }
    rows
}

/// Strip everything up to and including U+0020 from both ends.
fn trim_field(field: &str) -> &str {
    field.trim_matches(|c: char| c <= ' ')
}
