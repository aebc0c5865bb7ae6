// src/commands/helpers.rs

//! Small parsing helpers shared by the `BF*` commands.

use crate::error::BloomError;
use bytes::Bytes;

/// Parses a bulk-string argument as UTF-8 text.
pub fn extract_string(arg: &Bytes) -> Result<String, BloomError> {
    String::from_utf8(arg.to_vec()).map_err(|_| BloomError::NotAFloat)
}

/// Parses a bulk-string argument as an `f64` (used for the `ERROR` option).
pub fn parse_f64(arg: &Bytes) -> Result<f64, BloomError> {
    extract_string(arg)?.parse::<f64>().map_err(BloomError::from)
}

/// Parses a bulk-string argument as a generation index (used for `BFDEBUG
/// FILTER`). Parses as a signed integer first so that a negative-but-numeric
/// index is reported as out of range rather than unparseable.
pub fn parse_index(arg: &Bytes) -> Result<usize, BloomError> {
    let n = extract_string(arg)?
        .parse::<i64>()
        .map_err(|_| BloomError::InvalidFilterIndex)?;
    if n < 0 {
        return Err(BloomError::IndexOutOfRange);
    }
    Ok(n as usize)
}
