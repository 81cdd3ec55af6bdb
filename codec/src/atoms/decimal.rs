//! Exact decimals.
//!
//! Wire form: one prefix byte `(sign << 7) | scale`, where `scale` is the
//! number of digits after the point, followed by the digits with the point
//! removed as an unsigned varint.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use cursor::{Cursor, CursorError, ReadBuf, WriteBuf};
use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use super::varint::{read_var_uint, write_var_uint};
use crate::error::{CodecError, CodecResult};
use crate::limits::DecodeLimits;

const SIGN_BIT: u8 = 0x80;

const DIGITS_PER_BYTE_BOUND: usize = 3;

/// Largest number of fractional digits the prefix byte can carry.
pub const MAX_SCALE: i64 = 0x7F;

/// Converts a float through its shortest round-trip decimal form.
pub fn decimal_from_f64(value: f64) -> CodecResult<BigDecimal> {
    if !value.is_finite() {
        return Err(CodecError::InvalidDecimal {
            value: value.to_string(),
        });
    }
    // `Display` for floats never uses exponent notation.
    BigDecimal::from_str(&value.to_string()).map_err(|_| CodecError::InvalidDecimal {
        value: value.to_string(),
    })
}

/// Writes an exact decimal.
pub fn write_decimal<B: WriteBuf>(cursor: &mut Cursor<B>, value: &BigDecimal) -> CodecResult<()> {
    let (digits, scale) = value.as_bigint_and_exponent();
    let (digits, scale) = if scale < 0 && !digits.is_zero() {
        let exponent = u32::try_from(-scale).map_err(|_| out_of_range(value))?;
        // Each varint byte carries fewer than three decimal digits, so an
        // expansion this long cannot fit the remaining buffer.
        let min_len = exponent as usize / DIGITS_PER_BYTE_BOUND;
        if min_len > cursor.remaining() {
            return Err(CursorError::EndOfBuffer {
                offset: cursor.offset(),
                requested: min_len,
                available: cursor.remaining(),
            }
            .into());
        }
        (digits * BigInt::from(10u8).pow(exponent), 0)
    } else {
        (digits, scale.max(0))
    };
    if scale > MAX_SCALE {
        return Err(out_of_range(value));
    }

    let (sign, magnitude) = digits.into_parts();
    let mut prefix = scale as u8;
    if sign == Sign::Minus && !magnitude.is_zero() {
        prefix |= SIGN_BIT;
    }
    cursor.set_u8(prefix)?;
    write_var_uint(cursor, &magnitude)
}

/// Reads an exact decimal. The digit varint is bounded by `limits`.
pub fn read_decimal<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
) -> CodecResult<BigDecimal> {
    let prefix = cursor.get_u8()?;
    let scale = i64::from(prefix & !SIGN_BIT);
    let sign = if prefix & SIGN_BIT == 0 {
        Sign::Plus
    } else {
        Sign::Minus
    };
    let magnitude = read_var_uint(cursor, limits)?;
    Ok(BigDecimal::new(BigInt::from_biguint(sign, magnitude), scale))
}

fn out_of_range(value: &BigDecimal) -> CodecError {
    CodecError::OutOfRange {
        kind: "decimal",
        value: value.to_string(),
    }
}
