//! Code-point and single-byte strings.
//!
//! Both encodings count characters, not bytes. Without a fixed length the
//! character count is written first as an unsigned varint.

use cursor::{Cursor, ReadBuf, WriteBuf};

use super::varint::{read_small_var_uint, write_small_var_uint};
use crate::error::{CodecError, CodecResult};
use crate::limits::DecodeLimits;

/// Writes a string as one varint code point per character.
pub fn write_string<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    value: &str,
    length: Option<usize>,
) -> CodecResult<()> {
    let count = value.chars().count();
    write_count(cursor, count, length)?;
    for c in value.chars() {
        write_small_var_uint(cursor, u64::from(u32::from(c)))?;
    }
    Ok(())
}

/// Reads a string written by [`write_string`].
pub fn read_string<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    length: Option<usize>,
    limits: &DecodeLimits,
) -> CodecResult<String> {
    let count = read_count(cursor, length, limits)?;
    let mut value = String::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let code_point = read_small_var_uint(cursor)?;
        let c = char::from_u32(code_point).ok_or(CodecError::InvalidCodePoint { code_point })?;
        value.push(c);
    }
    Ok(value)
}

/// Writes a string as one raw byte per character.
///
/// Characters above U+00FF are rejected before anything is written.
pub fn write_string256<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    value: &str,
    length: Option<usize>,
) -> CodecResult<()> {
    let bytes = value
        .chars()
        .map(|c| {
            u8::try_from(c).map_err(|_| CodecError::OutOfRange {
                kind: "string256",
                value: format!("{c:?}"),
            })
        })
        .collect::<CodecResult<Vec<u8>>>()?;
    write_count(cursor, bytes.len(), length)?;
    cursor.set_bytes(&bytes)?;
    Ok(())
}

/// Reads a string written by [`write_string256`], decoding bytes as Latin-1.
pub fn read_string256<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    length: Option<usize>,
    limits: &DecodeLimits,
) -> CodecResult<String> {
    let count = read_count(cursor, length, limits)?;
    let bytes = cursor.get_bytes(count)?;
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

fn write_count<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    count: usize,
    length: Option<usize>,
) -> CodecResult<()> {
    match length {
        Some(expected) if expected != count => Err(CodecError::LengthMismatch {
            expected,
            actual: count,
        }),
        Some(_) => Ok(()),
        None => write_small_var_uint(cursor, count as u64),
    }
}

fn read_count<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    length: Option<usize>,
    limits: &DecodeLimits,
) -> CodecResult<usize> {
    let count = match length {
        Some(length) => length,
        None => read_small_var_uint(cursor)? as usize,
    };
    limits.check_string_len(count)?;
    Ok(count)
}
