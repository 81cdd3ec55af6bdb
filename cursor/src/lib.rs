//! Byte cursor primitives for the wirepack codec.
//!
//! This crate provides [`Cursor`], a position into a fixed-capacity byte buffer
//! with fixed-width primitive accessors. The codec crates thread a
//! `&mut Cursor<B>` through every read and write call.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked before any byte moves.
//! - **No domain knowledge** - This crate knows nothing about schemas or values.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use cursor::Cursor;
//!
//! let mut cursor = Cursor::new([0u8; 8]);
//! cursor.set_u8(7).unwrap();
//! cursor.set_u16(0xBEEF).unwrap();
//!
//! cursor.reset();
//! assert_eq!(cursor.get_u8().unwrap(), 7);
//! assert_eq!(cursor.get_u16().unwrap(), 0xBEEF);
//! ```

mod cursor;
mod error;
mod write;

pub use cursor::{Cursor, ReadBuf, WriteBuf};
pub use error::{CursorError, CursorResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let mut cursor = Cursor::new([0u8; 0]);
        assert!(cursor.is_empty());
        assert!(cursor.set_u8(1).is_err());
        assert!(cursor.get_u8().is_err());
    }

    #[test]
    fn mixed_roundtrip() {
        let mut cursor = Cursor::new([0u8; 32]);
        cursor.set_i8(-5).unwrap();
        cursor.set_u16(513).unwrap();
        cursor.set_i64(i64::MIN).unwrap();
        cursor.set_f32(0.25).unwrap();
        cursor.set_u64(u64::MAX).unwrap();
        let end = cursor.offset();

        cursor.reset();
        assert_eq!(cursor.get_i8().unwrap(), -5);
        assert_eq!(cursor.get_u16().unwrap(), 513);
        assert_eq!(cursor.get_i64().unwrap(), i64::MIN);
        assert_eq!(cursor.get_f32().unwrap().to_bits(), 0.25f32.to_bits());
        assert_eq!(cursor.get_u64().unwrap(), u64::MAX);
        assert_eq!(cursor.offset(), end);
    }

    #[test]
    fn doctest_example() {
        let mut cursor = Cursor::new([0u8; 8]);
        cursor.set_u8(7).unwrap();
        cursor.set_u16(0xBEEF).unwrap();

        cursor.reset();
        assert_eq!(cursor.get_u8().unwrap(), 7);
        assert_eq!(cursor.get_u16().unwrap(), 0xBEEF);
    }
}
