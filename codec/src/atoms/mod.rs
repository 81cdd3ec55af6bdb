//! Atom codecs: one scalar per call.
//!
//! [`write_atom`] and [`read_atom`] dispatch on [`AtomKind`] and convert
//! between [`Value`] and the wire representation of each kind. The individual
//! encoders are public for callers that work below the value layer.

pub mod bits;
pub mod decimal;
pub mod string;
pub mod varint;

use bigdecimal::BigDecimal;
use cursor::{Cursor, ReadBuf, WriteBuf};
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use schema::AtomKind;

use crate::error::{CodecError, CodecResult};
use crate::limits::DecodeLimits;
use crate::value::Value;

/// Writes `value` under the atom encoding `kind`.
///
/// Range and type errors are reported before any byte of the atom is written.
pub fn write_atom<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    kind: &AtomKind,
    value: &Value,
) -> CodecResult<()> {
    match kind {
        AtomKind::Bool => match value {
            Value::Bool(flag) => cursor.set_u8(u8::from(*flag))?,
            _ => return Err(mismatch(kind, value)),
        },
        AtomKind::Int8 => cursor.set_i8(fixed_integer(kind, value)?)?,
        AtomKind::Int16 => cursor.set_i16(fixed_integer(kind, value)?)?,
        AtomKind::Int32 => cursor.set_i32(fixed_integer(kind, value)?)?,
        AtomKind::Int64 => cursor.set_i64(fixed_integer(kind, value)?)?,
        AtomKind::Uint8 => cursor.set_u8(fixed_integer(kind, value)?)?,
        AtomKind::Uint16 => cursor.set_u16(fixed_integer(kind, value)?)?,
        AtomKind::Uint32 => cursor.set_u32(fixed_integer(kind, value)?)?,
        AtomKind::Uint64 => cursor.set_u64(fixed_integer(kind, value)?)?,
        AtomKind::Float32 => cursor.set_f32(float(kind, value)? as f32)?,
        AtomKind::Float64 => cursor.set_f64(float(kind, value)?)?,
        AtomKind::VarUint => varint::write_var_uint(cursor, &unsigned(kind, value)?)?,
        AtomKind::SmallVarUint => {
            varint::write_small_var_uint(cursor, fixed_integer(kind, value)?)?;
        }
        AtomKind::VarInt => varint::write_var_int(cursor, &signed(kind, value)?)?,
        AtomKind::SmallVarInt => {
            varint::write_small_var_int(cursor, fixed_integer(kind, value)?)?;
        }
        AtomKind::Decimal => decimal::write_decimal(cursor, &to_decimal(kind, value)?)?,
        AtomKind::Bits { widths } => {
            let items = value.as_array().ok_or_else(|| mismatch(kind, value))?;
            let fields = items
                .iter()
                .map(|item| fixed_integer::<u32>(kind, item))
                .collect::<CodecResult<Vec<_>>>()?;
            bits::write_bits(cursor, widths, &fields)?;
        }
        AtomKind::BitVec => {
            let items = value.as_array().ok_or_else(|| mismatch(kind, value))?;
            let flags = items
                .iter()
                .map(|item| match item {
                    Value::Bool(flag) => Ok(*flag),
                    _ => Err(mismatch(kind, item)),
                })
                .collect::<CodecResult<Vec<_>>>()?;
            bits::write_bit_vec(cursor, &flags)?;
        }
        AtomKind::String { length } => {
            let text = value.as_str().ok_or_else(|| mismatch(kind, value))?;
            string::write_string(cursor, text, *length)?;
        }
        AtomKind::String256 { length } => {
            let text = value.as_str().ok_or_else(|| mismatch(kind, value))?;
            string::write_string256(cursor, text, *length)?;
        }
    }
    Ok(())
}

/// Reads one atom of encoding `kind`.
pub fn read_atom<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    kind: &AtomKind,
    limits: &DecodeLimits,
) -> CodecResult<Value> {
    let value = match kind {
        AtomKind::Bool => Value::Bool(cursor.get_u8()? != 0),
        AtomKind::Int8 => Value::Int(i64::from(cursor.get_i8()?)),
        AtomKind::Int16 => Value::Int(i64::from(cursor.get_i16()?)),
        AtomKind::Int32 => Value::Int(i64::from(cursor.get_i32()?)),
        AtomKind::Int64 => Value::Int(cursor.get_i64()?),
        AtomKind::Uint8 => Value::Int(i64::from(cursor.get_u8()?)),
        AtomKind::Uint16 => Value::Int(i64::from(cursor.get_u16()?)),
        AtomKind::Uint32 => Value::Int(i64::from(cursor.get_u32()?)),
        AtomKind::Uint64 => Value::from(cursor.get_u64()?),
        AtomKind::Float32 => Value::Float(f64::from(cursor.get_f32()?)),
        AtomKind::Float64 => Value::Float(cursor.get_f64()?),
        AtomKind::VarUint => Value::from(varint::read_var_uint(cursor, limits)?),
        AtomKind::SmallVarUint => Value::from(varint::read_small_var_uint(cursor)?),
        AtomKind::VarInt => Value::from(varint::read_var_int(cursor, limits)?),
        AtomKind::SmallVarInt => Value::from(varint::read_small_var_int(cursor)?),
        AtomKind::Decimal => Value::Decimal(decimal::read_decimal(cursor, limits)?),
        AtomKind::Bits { widths } => Value::Array(
            bits::read_bits(cursor, widths)?
                .into_iter()
                .map(Value::from)
                .collect(),
        ),
        AtomKind::BitVec => Value::Array(
            bits::read_bit_vec(cursor, limits)?
                .into_iter()
                .map(Value::Bool)
                .collect(),
        ),
        AtomKind::String { length } => {
            Value::String(string::read_string(cursor, *length, limits)?)
        }
        AtomKind::String256 { length } => {
            Value::String(string::read_string256(cursor, *length, limits)?)
        }
    };
    Ok(value)
}

/// Returns `true` if `value` can be written under `kind`.
pub(crate) fn atom_accepts(kind: &AtomKind, value: &Value) -> bool {
    match kind {
        AtomKind::Bool => matches!(value, Value::Bool(_)),
        AtomKind::Float32 | AtomKind::Float64 => float(kind, value).is_ok(),
        AtomKind::Decimal => to_decimal(kind, value).is_ok(),
        AtomKind::Bits { widths } => {
            bits::check_widths(widths).is_ok()
                && value.as_array().map_or(false, |items| {
                    items.len() == widths.len()
                        && items.iter().zip(widths).all(|(item, &width)| {
                            item.as_i128()
                                .map_or(false, |field| (0..1i128 << width).contains(&field))
                        })
                })
        }
        AtomKind::BitVec => value
            .as_array()
            .map_or(false, |items| items.iter().all(|item| matches!(item, Value::Bool(_)))),
        AtomKind::String { length } => value
            .as_str()
            .map_or(false, |text| fixed_length_ok(text, *length)),
        AtomKind::String256 { length } => value.as_str().map_or(false, |text| {
            text.chars().all(|c| u32::from(c) <= 0xFF) && fixed_length_ok(text, *length)
        }),
        _ => match (kind.integer_range(), value) {
            (Some((min, max)), Value::Int(_) | Value::BigInt(_)) => {
                let Some(wide) = value.to_bigint() else {
                    return false;
                };
                min.map_or(true, |min| wide >= BigInt::from(min))
                    && max.map_or(true, |max| wide <= BigInt::from(max))
            }
            _ => false,
        },
    }
}

fn fixed_length_ok(text: &str, length: Option<usize>) -> bool {
    length.map_or(true, |length| text.chars().count() == length)
}

fn fixed_integer<T: TryFrom<i128>>(kind: &AtomKind, value: &Value) -> CodecResult<T> {
    let wide = match value {
        Value::Int(v) => i128::from(*v),
        Value::BigInt(v) => v.to_i128().ok_or_else(|| out_of_range(kind, value))?,
        _ => return Err(mismatch(kind, value)),
    };
    T::try_from(wide).map_err(|_| out_of_range(kind, value))
}

fn unsigned(kind: &AtomKind, value: &Value) -> CodecResult<BigUint> {
    signed(kind, value)?
        .to_biguint()
        .ok_or_else(|| out_of_range(kind, value))
}

fn signed(kind: &AtomKind, value: &Value) -> CodecResult<BigInt> {
    value.to_bigint().ok_or_else(|| mismatch(kind, value))
}

fn float(kind: &AtomKind, value: &Value) -> CodecResult<f64> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f64),
        _ => Err(mismatch(kind, value)),
    }
}

fn to_decimal(kind: &AtomKind, value: &Value) -> CodecResult<BigDecimal> {
    match value {
        Value::Decimal(v) => Ok(v.clone()),
        Value::Int(v) => Ok(BigDecimal::new(BigInt::from(*v), 0)),
        Value::BigInt(v) => Ok(BigDecimal::new(v.clone(), 0)),
        Value::Float(v) => decimal::decimal_from_f64(*v),
        _ => Err(mismatch(kind, value)),
    }
}

pub(crate) fn mismatch(kind: &AtomKind, value: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected: kind.name(),
        found: value.kind_name(),
    }
}

fn out_of_range(kind: &AtomKind, value: &Value) -> CodecError {
    CodecError::OutOfRange {
        kind: kind.name(),
        value: value.to_string(),
    }
}
