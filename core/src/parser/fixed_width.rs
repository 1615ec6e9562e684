//! parser/fixed_width.rs
//!
//! Fixed-width district line parser.
//!
//! Design notes:
//! - Fields are cut by exact byte spans from `constants::fields`, never by
//!   splitting on whitespace.
//! - Each span is trimmed before integer conversion.
//! - The parsed values go through `StateRecord::new`, so containment is
//!   checked once here, at construction.

use thiserror::Error;

use crate::constants::{fields, FieldSpan};
use crate::records::{RecordError, StateRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line ends before the field's byte span.
    #[error("line too short for {field}: need {needed} bytes, got {actual}")]
    LineTooShort { field: &'static str, needed: usize, actual: usize },

    /// Field span cuts through a multibyte character.
    #[error("{field} is not valid text at its fixed offsets")]
    InvalidEncoding { field: &'static str },

    /// Field text is empty or not an integer.
    #[error("{field} is not an integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Values parsed but the record breaks an invariant.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Parse one district line into a validated record.
///
/// # Errors
/// - `ParseError::LineTooShort` if any span lies past the end of the line
/// - `ParseError::InvalidNumber` if a trimmed span is not an `i32`
/// - `ParseError::Record` if the counts break sign or containment rules
pub fn parse_line(line: &str) -> Result<StateRecord, ParseError> {
    let state_code = parse_field(line, fields::STATE_CODE)?;
    let total = parse_field(line, fields::TOTAL_POPULATION)?;
    let child = parse_field(line, fields::CHILD_POPULATION)?;
    let poverty = parse_field(line, fields::CHILD_POVERTY_POPULATION)?;

    Ok(StateRecord::new(state_code, total, child, poverty)?)
}

/// Cut `span` out of `line`, trim it and convert it to an integer.
pub fn parse_field(line: &str, span: FieldSpan) -> Result<i32, ParseError> {
    let raw = field_text(line, span)?;
    let text = raw.trim();
    text.parse::<i32>().map_err(|_| ParseError::InvalidNumber {
        field: span.name,
        value: text.to_string(),
    })
}

/// Raw (untrimmed) text of one span.
pub fn field_text(line: &str, span: FieldSpan) -> Result<&str, ParseError> {
    let bytes = line.as_bytes();
    let slice = bytes.get(span.range()).ok_or(ParseError::LineTooShort {
        field: span.name,
        needed: span.end,
        actual: bytes.len(),
    })?;
    std::str::from_utf8(slice).map_err(|_| ParseError::InvalidEncoding { field: span.name })
}
