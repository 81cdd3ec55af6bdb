//! Self-describing values.
//!
//! Every value starts with a discriminant byte. Small unsigned integers are
//! carried inline in the discriminant itself:
//!
//! | Byte | Meaning | Payload |
//! |---|---|---|
//! | `0x00..=0xEF` | unsigned integer 0 to 239 | none |
//! | `0xF0` | null | none |
//! | `0xF1` / `0xF2` | false / true | none |
//! | `0xF3..=0xF6` | uint8/16/32/64 | fixed width |
//! | `0xF7..=0xFA` | int8/16/32/64 | fixed width |
//! | `0xFB` / `0xFC` | float32 / float64 | fixed width |
//! | `0xFD` | string | char count + code points |
//! | `0xFE` | array | count + values |
//! | `0xFF` | object | count + (key, value) pairs |

use std::collections::BTreeMap;

use cursor::{Cursor, ReadBuf, WriteBuf};
use num_traits::ToPrimitive;

use crate::atoms::string::{read_string, write_string};
use crate::atoms::varint::{read_small_var_uint, write_small_var_uint};
use crate::error::{CodecError, CodecResult};
use crate::limits::DecodeLimits;
use crate::value::Value;

/// Largest integer carried inline in the discriminant.
pub const INLINE_MAX: u8 = 0xEF;

pub const NULL: u8 = 0xF0;
pub const FALSE: u8 = 0xF1;
pub const TRUE: u8 = 0xF2;
pub const UINT8: u8 = 0xF3;
pub const UINT16: u8 = 0xF4;
pub const UINT32: u8 = 0xF5;
pub const UINT64: u8 = 0xF6;
pub const INT8: u8 = 0xF7;
pub const INT16: u8 = 0xF8;
pub const INT32: u8 = 0xF9;
pub const INT64: u8 = 0xFA;
pub const FLOAT32: u8 = 0xFB;
pub const FLOAT64: u8 = 0xFC;
pub const STRING: u8 = 0xFD;
pub const ARRAY: u8 = 0xFE;
pub const OBJECT: u8 = 0xFF;

/// Writes `value` with its discriminant.
pub fn write_dynamic<B: WriteBuf>(cursor: &mut Cursor<B>, value: &Value) -> CodecResult<()> {
    match value {
        Value::Null => cursor.set_u8(NULL)?,
        Value::Bool(false) => cursor.set_u8(FALSE)?,
        Value::Bool(true) => cursor.set_u8(TRUE)?,
        Value::Int(v) => match u64::try_from(*v) {
            Ok(unsigned) => write_unsigned(cursor, unsigned)?,
            Err(_) => write_negative(cursor, *v)?,
        },
        Value::BigInt(v) => {
            let unsigned = v.to_u64().ok_or(CodecError::Unclassifiable {
                kind: "integer beyond 64 bits",
            })?;
            write_unsigned(cursor, unsigned)?;
        }
        Value::Float(v) => {
            let narrow = *v as f32;
            if f64::from(narrow) == *v {
                cursor.set_u8(FLOAT32)?;
                cursor.set_f32(narrow)?;
            } else {
                cursor.set_u8(FLOAT64)?;
                cursor.set_f64(*v)?;
            }
        }
        Value::Decimal(_) => {
            return Err(CodecError::Unclassifiable {
                kind: value.kind_name(),
            })
        }
        Value::String(text) => {
            cursor.set_u8(STRING)?;
            write_string(cursor, text, None)?;
        }
        Value::Array(items) => {
            cursor.set_u8(ARRAY)?;
            write_small_var_uint(cursor, items.len() as u64)?;
            for item in items {
                write_dynamic(cursor, item)?;
            }
        }
        Value::Object(entries) => {
            cursor.set_u8(OBJECT)?;
            write_small_var_uint(cursor, entries.len() as u64)?;
            for (key, item) in entries {
                write_string(cursor, key, None)?;
                write_dynamic(cursor, item)?;
            }
        }
    }
    Ok(())
}

/// Reads a self-describing value with default limits.
pub fn read_dynamic<B: ReadBuf>(cursor: &mut Cursor<B>) -> CodecResult<Value> {
    read_dynamic_with_limits(cursor, &DecodeLimits::default())
}

/// Reads a self-describing value.
pub fn read_dynamic_with_limits<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
) -> CodecResult<Value> {
    read_at(cursor, limits, 0)
}

pub(crate) fn read_at<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
    depth: usize,
) -> CodecResult<Value> {
    let tag = cursor.get_u8()?;
    let value = match tag {
        0..=INLINE_MAX => Value::Int(i64::from(tag)),
        NULL => Value::Null,
        FALSE => Value::Bool(false),
        TRUE => Value::Bool(true),
        UINT8 => Value::Int(i64::from(cursor.get_u8()?)),
        UINT16 => Value::Int(i64::from(cursor.get_u16()?)),
        UINT32 => Value::Int(i64::from(cursor.get_u32()?)),
        UINT64 => Value::from(cursor.get_u64()?),
        INT8 => Value::Int(i64::from(cursor.get_i8()?)),
        INT16 => Value::Int(i64::from(cursor.get_i16()?)),
        INT32 => Value::Int(i64::from(cursor.get_i32()?)),
        INT64 => Value::Int(cursor.get_i64()?),
        FLOAT32 => Value::Float(f64::from(cursor.get_f32()?)),
        FLOAT64 => Value::Float(cursor.get_f64()?),
        STRING => Value::String(read_string(cursor, None, limits)?),
        ARRAY => {
            limits.check_depth(depth + 1)?;
            let count = read_small_var_uint(cursor)? as usize;
            limits.check_collection_len(count)?;
            let mut items = Vec::with_capacity(count.min(cursor.remaining()));
            for _ in 0..count {
                items.push(read_at(cursor, limits, depth + 1)?);
            }
            Value::Array(items)
        }
        OBJECT => {
            limits.check_depth(depth + 1)?;
            let count = read_small_var_uint(cursor)? as usize;
            limits.check_collection_len(count)?;
            Value::Object(read_entries(cursor, count, limits, depth + 1)?)
        }
    };
    Ok(value)
}

/// Reads `count` (key, self-describing value) pairs. Later keys win.
pub(crate) fn read_entries<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    count: usize,
    limits: &DecodeLimits,
    depth: usize,
) -> CodecResult<BTreeMap<String, Value>> {
    let mut entries = BTreeMap::new();
    for _ in 0..count {
        let key = read_string(cursor, None, limits)?;
        let item = read_at(cursor, limits, depth)?;
        entries.insert(key, item);
    }
    Ok(entries)
}

/// Returns `true` if `value` has a self-describing encoding.
#[must_use]
pub fn is_classifiable(value: &Value) -> bool {
    match value {
        Value::BigInt(v) => v.to_u64().is_some(),
        Value::Decimal(_) => false,
        Value::Array(items) => items.iter().all(is_classifiable),
        Value::Object(entries) => entries.values().all(is_classifiable),
        _ => true,
    }
}

fn write_unsigned<B: WriteBuf>(cursor: &mut Cursor<B>, value: u64) -> CodecResult<()> {
    if value <= u64::from(INLINE_MAX) {
        cursor.set_u8(value as u8)?;
    } else if let Ok(v) = u8::try_from(value) {
        cursor.set_u8(UINT8)?;
        cursor.set_u8(v)?;
    } else if let Ok(v) = u16::try_from(value) {
        cursor.set_u8(UINT16)?;
        cursor.set_u16(v)?;
    } else if let Ok(v) = u32::try_from(value) {
        cursor.set_u8(UINT32)?;
        cursor.set_u32(v)?;
    } else {
        cursor.set_u8(UINT64)?;
        cursor.set_u64(value)?;
    }
    Ok(())
}

fn write_negative<B: WriteBuf>(cursor: &mut Cursor<B>, value: i64) -> CodecResult<()> {
    if let Ok(v) = i8::try_from(value) {
        cursor.set_u8(INT8)?;
        cursor.set_i8(v)?;
    } else if let Ok(v) = i16::try_from(value) {
        cursor.set_u8(INT16)?;
        cursor.set_i16(v)?;
    } else if let Ok(v) = i32::try_from(value) {
        cursor.set_u8(INT32)?;
        cursor.set_i32(v)?;
    } else {
        cursor.set_u8(INT64)?;
        cursor.set_i64(value)?;
    }
    Ok(())
}
