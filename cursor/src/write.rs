//! Bounded writes through a [`Cursor`].

use crate::cursor::{Cursor, WriteBuf};
use crate::error::CursorResult;

impl<B: WriteBuf> Cursor<B> {
    /// Writes a `u8`.
    pub fn set_u8(&mut self, value: u8) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes an `i8`.
    pub fn set_i8(&mut self, value: i8) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `u16`.
    pub fn set_u16(&mut self, value: u16) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `i16`.
    pub fn set_i16(&mut self, value: i16) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `u32`.
    pub fn set_u32(&mut self, value: u32) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `i32`.
    pub fn set_i32(&mut self, value: i32) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `u64`.
    pub fn set_u64(&mut self, value: u64) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian `i64`.
    pub fn set_i64(&mut self, value: i64) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian IEEE-754 `f32`.
    pub fn set_f32(&mut self, value: f32) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes a big-endian IEEE-754 `f64`.
    pub fn set_f64(&mut self, value: f64) -> CursorResult<()> {
        self.put(value.to_be_bytes())
    }

    /// Writes raw bytes.
    ///
    /// Either all of `bytes` is written or nothing is.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> CursorResult<()> {
        self.ensure(bytes.len())?;
        let start = self.offset();
        self.buf_mut()[start..start + bytes.len()].copy_from_slice(bytes);
        self.advance(bytes.len());
        Ok(())
    }

    fn put<const N: usize>(&mut self, bytes: [u8; N]) -> CursorResult<()> {
        self.set_bytes(&bytes)
    }
}
