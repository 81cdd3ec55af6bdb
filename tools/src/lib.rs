//! Command-line helpers for the wirepack codec.
//!
//! This crate bridges JSON documents and wirepack bytes:
//!
//! - Convert JSON to [`Value`]s (optionally guided by a schema) and back
//! - Encode values with a schema, or self-describing without one
//! - Decode bytes and report how much of the input was consumed
//!
//! # Design Principles
//!
//! - **Lossless output** - Big integers and decimals print as strings rather than rounding.
//! - **Library first** - The binary is a thin shell over these functions.

mod json;

use anyhow::{Context, Result};
use codec::{CodecError, DecodeLimits, Value};
use cursor::{Cursor, CursorError};
use schema::Schema;

pub use json::{json_to_value, json_to_value_for, load_schema, value_to_json};

/// Initial output buffer size for [`encode`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// Upper bound on the output buffer [`encode`] will grow to.
pub const MAX_CAPACITY: usize = 1 << 30;

/// A decoded value along with how much input it used.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub consumed: usize,
    pub trailing: usize,
}

/// Encodes `value` under `schema`, or self-describing when `schema` is `None`.
///
/// Starts with a buffer of `capacity` bytes and doubles it while the value
/// does not fit, up to [`MAX_CAPACITY`].
pub fn encode(schema: Option<&Schema>, value: &Value, capacity: usize) -> Result<Vec<u8>> {
    let mut capacity = capacity.max(1);
    loop {
        let mut cursor = Cursor::new(vec![0u8; capacity]);
        let result = match schema {
            Some(schema) => codec::write_value(&mut cursor, schema, value),
            None => codec::write_dynamic(&mut cursor, value),
        };
        match result {
            Ok(()) => return Ok(cursor.written().to_vec()),
            Err(CodecError::Cursor(CursorError::EndOfBuffer { .. })) if capacity < MAX_CAPACITY => {
                capacity = capacity.saturating_mul(2).min(MAX_CAPACITY);
            }
            Err(err) => return Err(err).context("encode value"),
        }
    }
}

/// Decodes one value from the start of `bytes`.
pub fn decode(schema: Option<&Schema>, bytes: &[u8], limits: &DecodeLimits) -> Result<Decoded> {
    let mut cursor = Cursor::new(bytes);
    let value = match schema {
        Some(schema) => codec::read_value_with_limits(&mut cursor, schema, limits),
        None => codec::read_dynamic_with_limits(&mut cursor, limits),
    }
    .context("decode value")?;
    Ok(Decoded {
        value,
        consumed: cursor.offset(),
        trailing: cursor.remaining(),
    })
}

/// Formats bytes as space-separated lowercase hex pairs.
#[must_use]
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses hex text, ignoring whitespace.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        anyhow::bail!("odd number of hex digits");
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).context("hex input is not ascii")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("invalid hex byte `{pair}`"))
        })
        .collect()
}
