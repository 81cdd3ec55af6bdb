//! Unsigned and sign-magnitude varints.
//!
//! Both signednesses come in two wire-compatible tiers: a 32-bit-safe tier
//! limited to magnitudes below 2^31 and an arbitrary-precision tier. The
//! dispatchers pick the small tier whenever the value allows it.

use cursor::{Cursor, ReadBuf, WriteBuf};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};
use schema::SMALL_VARINT_LIMIT;

use crate::error::{CodecError, CodecResult};
use crate::limits::DecodeLimits;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;
const SIGN: u8 = 0x40;
const FIRST_PAYLOAD: u8 = 0x3F;

/// Longest small-tier encoding: 31 value bits in 7-bit groups.
const MAX_SMALL_UNSIGNED_BYTES: usize = 5;

/// Longest small-tier signed encoding: 6 bits, then 7-bit groups.
const MAX_SMALL_SIGNED_BYTES: usize = 5;

/// Writes `value` with the 32-bit-safe unsigned tier.
pub fn write_small_var_uint<B: WriteBuf>(cursor: &mut Cursor<B>, value: u64) -> CodecResult<()> {
    if value >= SMALL_VARINT_LIMIT {
        return Err(CodecError::OutOfRange {
            kind: "small varuint",
            value: value.to_string(),
        });
    }
    let mut bytes = [0u8; MAX_SMALL_UNSIGNED_BYTES];
    let mut len = 0;
    let mut rest = value;
    loop {
        let low = (rest & u64::from(PAYLOAD)) as u8;
        rest >>= 7;
        if rest == 0 {
            bytes[len] = low;
            len += 1;
            break;
        }
        bytes[len] = low | CONTINUATION;
        len += 1;
    }
    cursor.set_bytes(&bytes[..len])?;
    Ok(())
}

/// Reads a value written by either unsigned tier, failing if it is 2^31 or more.
pub fn read_small_var_uint<B: ReadBuf>(cursor: &mut Cursor<B>) -> CodecResult<u32> {
    let mut value = 0u64;
    for index in 0..MAX_SMALL_UNSIGNED_BYTES {
        let byte = cursor.get_u8()?;
        value |= u64::from(byte & PAYLOAD) << (7 * index);
        if byte & CONTINUATION == 0 {
            return small_magnitude(value, "small varuint");
        }
    }
    Err(CodecError::VarintOverflow {
        kind: "small varuint",
    })
}

/// Writes `value` with the arbitrary-precision unsigned tier.
pub fn write_big_var_uint<B: WriteBuf>(cursor: &mut Cursor<B>, value: &BigUint) -> CodecResult<()> {
    if value.is_zero() {
        cursor.set_u8(0)?;
        return Ok(());
    }
    let mut digits = value.to_radix_le(128);
    let last = digits.len() - 1;
    for digit in &mut digits[..last] {
        *digit |= CONTINUATION;
    }
    cursor.set_bytes(&digits)?;
    Ok(())
}

/// Reads an unsigned varint of any length, up to `limits.max_varint_bytes`.
pub fn read_big_var_uint<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
) -> CodecResult<BigUint> {
    let groups = read_groups(cursor, Vec::new(), limits)?;
    from_groups(&groups)
}

/// Writes an unsigned varint, using the small tier when `value < 2^31`.
pub fn write_var_uint<B: WriteBuf>(cursor: &mut Cursor<B>, value: &BigUint) -> CodecResult<()> {
    match value.to_u64() {
        Some(small) if small < SMALL_VARINT_LIMIT => write_small_var_uint(cursor, small),
        _ => write_big_var_uint(cursor, value),
    }
}

/// Reads an unsigned varint written by either tier.
pub fn read_var_uint<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
) -> CodecResult<BigUint> {
    read_big_var_uint(cursor, limits)
}

/// Writes `value` with the 32-bit-safe sign-magnitude tier.
///
/// The magnitude must be below 2^31. Zero is always written unsigned.
pub fn write_small_var_int<B: WriteBuf>(cursor: &mut Cursor<B>, value: i64) -> CodecResult<()> {
    let magnitude = value.unsigned_abs();
    if magnitude >= SMALL_VARINT_LIMIT {
        return Err(CodecError::OutOfRange {
            kind: "small varint",
            value: value.to_string(),
        });
    }
    let mut bytes = [0u8; MAX_SMALL_SIGNED_BYTES];
    let mut first = (magnitude & u64::from(FIRST_PAYLOAD)) as u8;
    if value < 0 {
        first |= SIGN;
    }
    let mut rest = magnitude >> 6;
    let mut len = 1;
    if rest != 0 {
        first |= CONTINUATION;
    }
    bytes[0] = first;
    while rest != 0 {
        let mut byte = (rest & u64::from(PAYLOAD)) as u8;
        rest >>= 7;
        if rest != 0 {
            byte |= CONTINUATION;
        }
        bytes[len] = byte;
        len += 1;
    }
    cursor.set_bytes(&bytes[..len])?;
    Ok(())
}

/// Reads a sign-magnitude varint, failing if its magnitude is 2^31 or more.
pub fn read_small_var_int<B: ReadBuf>(cursor: &mut Cursor<B>) -> CodecResult<i32> {
    let first = cursor.get_u8()?;
    let negative = first & SIGN != 0;
    let mut magnitude = u64::from(first & FIRST_PAYLOAD);
    let mut more = first & CONTINUATION != 0;
    let mut shift = 6;
    let mut len = 1;
    while more {
        if len == MAX_SMALL_SIGNED_BYTES {
            return Err(CodecError::VarintOverflow {
                kind: "small varint",
            });
        }
        let byte = cursor.get_u8()?;
        magnitude |= u64::from(byte & PAYLOAD) << shift;
        more = byte & CONTINUATION != 0;
        shift += 7;
        len += 1;
    }
    let magnitude = small_magnitude(magnitude, "small varint")?;
    // Magnitude is below 2^31, so it fits `i32` with either sign.
    let magnitude = magnitude as i32;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Writes `value` with the arbitrary-precision sign-magnitude tier.
pub fn write_big_var_int<B: WriteBuf>(cursor: &mut Cursor<B>, value: &BigInt) -> CodecResult<()> {
    let magnitude = value.magnitude();
    let low = (magnitude % 64u8).to_u8().unwrap_or(0);
    let rest: BigUint = magnitude >> 6usize;

    let mut first = low;
    if value.sign() == Sign::Minus {
        first |= SIGN;
    }
    if rest.is_zero() {
        cursor.set_u8(first)?;
        return Ok(());
    }

    let mut bytes = Vec::with_capacity(1 + rest.bits().div_ceil(7) as usize);
    bytes.push(first | CONTINUATION);
    let mut digits = rest.to_radix_le(128);
    let last = digits.len() - 1;
    for digit in &mut digits[..last] {
        *digit |= CONTINUATION;
    }
    bytes.extend_from_slice(&digits);
    cursor.set_bytes(&bytes)?;
    Ok(())
}

/// Reads a sign-magnitude varint of any length, up to `limits.max_varint_bytes`.
pub fn read_big_var_int<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
) -> CodecResult<BigInt> {
    let first = cursor.get_u8()?;
    let sign = if first & SIGN == 0 {
        Sign::Plus
    } else {
        Sign::Minus
    };
    let mut magnitude = BigUint::from(first & FIRST_PAYLOAD);
    if first & CONTINUATION != 0 {
        let groups = read_groups(cursor, vec![first], limits)?;
        magnitude |= from_groups(&groups[1..])? << 6usize;
    }
    // A zero magnitude normalizes to an unsigned zero.
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Writes a sign-magnitude varint, using the small tier when `|value| < 2^31`.
pub fn write_var_int<B: WriteBuf>(cursor: &mut Cursor<B>, value: &BigInt) -> CodecResult<()> {
    match value.to_i64() {
        Some(small) if small.unsigned_abs() < SMALL_VARINT_LIMIT => {
            write_small_var_int(cursor, small)
        }
        _ => write_big_var_int(cursor, value),
    }
}

/// Reads a sign-magnitude varint written by either tier.
pub fn read_var_int<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    limits: &DecodeLimits,
) -> CodecResult<BigInt> {
    read_big_var_int(cursor, limits)
}

/// Number of bytes the unsigned encoding of `value` occupies.
#[must_use]
pub fn var_uint_len(value: &BigUint) -> usize {
    (value.bits().max(1)).div_ceil(7) as usize
}

/// Appends 7-bit groups to `groups` until a byte without the continuation
/// flag. `groups` holds bytes already consumed for this varint.
fn read_groups<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    mut groups: Vec<u8>,
    limits: &DecodeLimits,
) -> CodecResult<Vec<u8>> {
    loop {
        limits.check_varint_len(groups.len() + 1)?;
        let byte = cursor.get_u8()?;
        groups.push(byte & PAYLOAD);
        if byte & CONTINUATION == 0 {
            return Ok(groups);
        }
    }
}

fn from_groups(groups: &[u8]) -> CodecResult<BigUint> {
    BigUint::from_radix_le(groups, 128).ok_or(CodecError::VarintOverflow { kind: "varuint" })
}

fn small_magnitude(value: u64, kind: &'static str) -> CodecResult<u32> {
    if value >= SMALL_VARINT_LIMIT {
        return Err(CodecError::VarintOverflow { kind });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LimitKind;

    fn encode_uint(value: u64) -> Vec<u8> {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        write_var_uint(&mut cursor, &BigUint::from(value)).unwrap();
        cursor.written().to_vec()
    }

    fn encode_int(value: i64) -> Vec<u8> {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        write_var_int(&mut cursor, &BigInt::from(value)).unwrap();
        cursor.written().to_vec()
    }

    #[test]
    fn unsigned_boundary_lengths() {
        assert_eq!(encode_uint(0), [0x00]);
        assert_eq!(encode_uint(127), [0x7F]);
        assert_eq!(encode_uint(128), [0x80, 0x01]);
        assert_eq!(encode_uint(16383), [0xFF, 0x7F]);
        assert_eq!(encode_uint(16384), [0x80, 0x80, 0x01]);
        assert_eq!(encode_uint(u64::from(u32::MAX)).len(), 5);
        assert_eq!(encode_uint(u64::MAX).len(), 10);
    }

    #[test]
    fn tiers_are_wire_compatible() {
        for value in [0u64, 1, 127, 128, 300, 16384, (1 << 31) - 1] {
            let mut small = Cursor::new(vec![0u8; 8]);
            write_small_var_uint(&mut small, value).unwrap();
            let mut big = Cursor::new(vec![0u8; 8]);
            write_big_var_uint(&mut big, &BigUint::from(value)).unwrap();
            assert_eq!(small.written(), big.written(), "value {value}");

            let mut small = Cursor::new(vec![0u8; 8]);
            write_small_var_int(&mut small, -(value as i64)).unwrap();
            let mut big = Cursor::new(vec![0u8; 8]);
            write_big_var_int(&mut big, &BigInt::from(-(value as i64))).unwrap();
            assert_eq!(small.written(), big.written(), "value -{value}");
        }
    }

    #[test]
    fn small_tier_rejects_two_pow_31() {
        let mut cursor = Cursor::new(vec![0u8; 8]);
        let err = write_small_var_uint(&mut cursor, 1 << 31).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { .. }));
        assert_eq!(cursor.offset(), 0);

        let err = write_small_var_int(&mut cursor, -(1 << 31)).unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { .. }));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn small_read_rejects_large_values() {
        let bytes = encode_uint(1 << 31);
        let mut cursor = Cursor::new(bytes);
        assert_eq!(
            read_small_var_uint(&mut cursor),
            Err(CodecError::VarintOverflow {
                kind: "small varuint"
            })
        );

        let mut cursor = Cursor::new(encode_uint(u64::MAX));
        assert!(matches!(
            read_small_var_uint(&mut cursor),
            Err(CodecError::VarintOverflow { .. })
        ));
    }

    #[test]
    fn big_tier_round_trips_beyond_u64() {
        let value = BigUint::from(u64::MAX) * 1_000_000u32 + 7u32;
        let mut cursor = Cursor::new(vec![0u8; 32]);
        write_var_uint(&mut cursor, &value).unwrap();
        assert_eq!(cursor.offset(), var_uint_len(&value));
        cursor.reset();
        assert_eq!(read_var_uint(&mut cursor, &DecodeLimits::default()).unwrap(), value);
    }

    #[test]
    fn signed_boundary_lengths() {
        assert_eq!(encode_int(0), [0x00]);
        assert_eq!(encode_int(63), [0x3F]);
        assert_eq!(encode_int(-63), [0x7F]);
        assert_eq!(encode_int(64), [0x80, 0x01]);
        assert_eq!(encode_int(-64), [0xC0, 0x01]);
        assert_eq!(encode_int(8191).len(), 2);
        assert_eq!(encode_int(8192).len(), 3);
    }

    #[test]
    fn signed_round_trip_is_symmetric() {
        for value in [1i64, 63, 64, 8192, 2_147_483_647, 1 << 40, i64::MAX] {
            for signed in [value, -value] {
                let mut cursor = Cursor::new(vec![0u8; 16]);
                write_var_int(&mut cursor, &BigInt::from(signed)).unwrap();
                cursor.reset();
                assert_eq!(
                    read_var_int(&mut cursor, &DecodeLimits::default()).unwrap(),
                    BigInt::from(signed)
                );
            }
            assert_eq!(encode_int(value).len(), encode_int(-value).len());
        }
    }

    #[test]
    fn negative_zero_reads_as_zero() {
        let mut cursor = Cursor::new(vec![SIGN]);
        assert_eq!(read_small_var_int(&mut cursor).unwrap(), 0);
        let mut cursor = Cursor::new(vec![SIGN]);
        let value = read_big_var_int(&mut cursor, &DecodeLimits::default()).unwrap();
        assert!(value.is_zero());
        assert_eq!(value.sign(), Sign::NoSign);
    }

    #[test]
    fn small_signed_read_round_trips_extremes() {
        for value in [-2_147_483_647i64, 2_147_483_647] {
            let mut cursor = Cursor::new(vec![0u8; 8]);
            write_small_var_int(&mut cursor, value).unwrap();
            cursor.reset();
            assert_eq!(i64::from(read_small_var_int(&mut cursor).unwrap()), value);
        }
    }

    #[test]
    fn truncated_varint_is_end_of_buffer() {
        let mut cursor = Cursor::new(vec![0x80, 0x80]);
        assert!(matches!(
            read_var_uint(&mut cursor, &DecodeLimits::default()),
            Err(CodecError::Cursor(_))
        ));
    }

    #[test]
    fn long_varints_stop_at_the_byte_limit() {
        let limits = DecodeLimits::for_testing();
        let mut bytes = vec![0xFF; 10_000];
        bytes.push(0x01);

        let mut cursor = Cursor::new(bytes.as_slice());
        assert_eq!(
            read_var_uint(&mut cursor, &limits),
            Err(CodecError::LimitsExceeded {
                kind: LimitKind::VarintLen,
                limit: 64,
                actual: 65,
            })
        );
        assert_eq!(cursor.offset(), 64);

        let mut cursor = Cursor::new(bytes.as_slice());
        assert!(matches!(
            read_var_int(&mut cursor, &limits),
            Err(CodecError::LimitsExceeded {
                kind: LimitKind::VarintLen,
                ..
            })
        ));
    }

    #[test]
    fn varints_at_the_byte_limit_decode() {
        let limits = DecodeLimits::for_testing();
        let value = (BigUint::from(1u8) << (7 * 64)) - 1u8;
        let mut cursor = Cursor::new(vec![0u8; 80]);
        write_var_uint(&mut cursor, &value).unwrap();
        assert_eq!(cursor.offset(), 64);
        cursor.reset();
        assert_eq!(read_var_uint(&mut cursor, &limits).unwrap(), value);

        let signed: BigInt = -(BigInt::from(1u8) << (6u32 + 7 * 63)) + 1;
        let mut cursor = Cursor::new(vec![0u8; 80]);
        write_var_int(&mut cursor, &signed).unwrap();
        assert_eq!(cursor.offset(), 64);
        cursor.reset();
        assert_eq!(read_var_int(&mut cursor, &limits).unwrap(), signed);
    }
}
