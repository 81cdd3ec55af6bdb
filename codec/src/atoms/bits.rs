//! Bit-packed unsigned fields.
//!
//! Fields are packed LSB-first into consecutive bytes and may straddle byte
//! boundaries. Widths are supplied by the schema and never transmitted; the
//! encoded length is `ceil(sum(widths) / 8)` bytes.
//!
//! Bit vectors use the same packing with a width of one per flag, preceded
//! by a flag count.

use cursor::{Cursor, ReadBuf, WriteBuf};
use schema::{SchemaError, MAX_BIT_WIDTH};

use super::varint::{read_small_var_uint, write_small_var_uint};
use crate::error::{CodecError, CodecResult};
use crate::limits::DecodeLimits;

/// Number of bytes occupied by fields of the given widths.
#[must_use]
pub fn packed_len(widths: &[u8]) -> usize {
    let bits: usize = widths.iter().map(|&width| usize::from(width)).sum();
    bits.div_ceil(8)
}

/// Writes `values` packed to `widths`.
///
/// Every value is range-checked before the first byte is written.
pub fn write_bits<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    widths: &[u8],
    values: &[u32],
) -> CodecResult<()> {
    check_widths(widths)?;
    if values.len() != widths.len() {
        return Err(CodecError::LengthMismatch {
            expected: widths.len(),
            actual: values.len(),
        });
    }
    for (&width, &value) in widths.iter().zip(values) {
        if u64::from(value) >> width != 0 {
            return Err(CodecError::OutOfRange {
                kind: "bits",
                value: format!("{value} (width {width})"),
            });
        }
    }

    let fields = widths.iter().zip(values).map(|(&width, &value)| (width, value));
    cursor.set_bytes(&pack(fields, packed_len(widths)))?;
    Ok(())
}

/// Reads fields packed to `widths`.
pub fn read_bits<B: ReadBuf>(cursor: &mut Cursor<B>, widths: &[u8]) -> CodecResult<Vec<u32>> {
    check_widths(widths)?;
    let bytes = cursor.get_bytes(packed_len(widths))?;
    Ok(unpack(bytes, widths.iter().copied()))
}

/// Writes a count followed by `flags` packed one bit each.
pub fn write_bit_vec<B: WriteBuf>(cursor: &mut Cursor<B>, flags: &[bool]) -> CodecResult<()> {
    write_small_var_uint(cursor, flags.len() as u64)?;
    let fields = flags.iter().map(|&flag| (1, u32::from(flag)));
    cursor.set_bytes(&pack(fields, flags.len().div_ceil(8)))?;
    Ok(())
}

/// Reads a count-prefixed bit vector.
pub fn read_bit_vec<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
) -> CodecResult<Vec<bool>> {
    let count = read_small_var_uint(cursor)? as usize;
    limits.check_collection_len(count)?;
    let bytes = cursor.get_bytes(count.div_ceil(8))?;
    let flags = unpack(bytes, std::iter::repeat(1).take(count));
    Ok(flags.into_iter().map(|bit| bit != 0).collect())
}

/// Packs `(width, value)` fields LSB-first. Values must fit their widths.
fn pack(fields: impl Iterator<Item = (u8, u32)>, len: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(len);
    let mut acc = 0u64;
    let mut filled = 0u32;
    for (width, value) in fields {
        acc |= u64::from(value) << filled;
        filled += u32::from(width);
        while filled >= 8 {
            bytes.push(acc as u8);
            acc >>= 8;
            filled -= 8;
        }
    }
    if filled > 0 {
        bytes.push(acc as u8);
    }
    bytes
}

/// Unpacks fields of the given widths from `bytes`, LSB-first.
fn unpack(bytes: &[u8], widths: impl Iterator<Item = u8>) -> Vec<u32> {
    let mut values = Vec::with_capacity(widths.size_hint().0);
    let mut next = bytes.iter();
    let mut acc = 0u64;
    let mut avail = 0u32;
    for width in widths {
        let width = u32::from(width);
        while avail < width {
            // Callers size `bytes` to cover every field.
            let byte = next.next().copied().unwrap_or(0);
            acc |= u64::from(byte) << avail;
            avail += 8;
        }
        let mask = (1u64 << width) - 1;
        values.push((acc & mask) as u32);
        acc >>= width;
        avail -= width;
    }
    values
}

pub(crate) fn check_widths(widths: &[u8]) -> CodecResult<()> {
    match widths
        .iter()
        .find(|&&width| width == 0 || width > MAX_BIT_WIDTH)
    {
        Some(&bits) => Err(SchemaError::InvalidBitWidth { bits }.into()),
        None => Ok(()),
    }
}
