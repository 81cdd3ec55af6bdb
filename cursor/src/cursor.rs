//! Cursor position handling and bounded reads.

use crate::error::{CursorError, CursorResult};

/// A byte buffer that can be read through a [`Cursor`].
///
/// Implemented for every `AsRef<[u8]>`, so slices, arrays and vectors all work.
pub trait ReadBuf: AsRef<[u8]> {}

impl<T: AsRef<[u8]> + ?Sized> ReadBuf for T {}

/// A byte buffer that can be written through a [`Cursor`].
///
/// The buffer's capacity is fixed; writes never grow it.
pub trait WriteBuf: AsRef<[u8]> + AsMut<[u8]> {}

impl<T: AsRef<[u8]> + AsMut<[u8]> + ?Sized> WriteBuf for T {}

/// A position into a fixed-capacity byte buffer.
///
/// Every accessor is bounds-checked up front: an access that would cross the
/// end of the buffer fails without touching any byte and without moving the
/// offset. Multi-byte values are big-endian.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor<B> {
    buf: B,
    offset: usize,
}

impl<B> Cursor<B> {
    /// Creates a cursor positioned at the start of `buf`.
    #[must_use]
    pub const fn new(buf: B) -> Self {
        Self { buf, offset: 0 }
    }

    /// Returns the current offset in bytes.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the offset back to the start of the buffer.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Returns a reference to the underlying buffer.
    #[must_use]
    pub const fn get_ref(&self) -> &B {
        &self.buf
    }

    /// Consumes the cursor, returning the underlying buffer.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: ReadBuf> Cursor<B> {
    /// Returns the total capacity of the buffer in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Returns the number of bytes between the offset and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.offset)
    }

    /// Returns `true` if the offset is at the end of the buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the bytes before the current offset.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf.as_ref()[..self.offset]
    }

    /// Moves the offset to an absolute position.
    ///
    /// The offset may equal the capacity but not exceed it.
    pub fn set_offset(&mut self, offset: usize) -> CursorResult<()> {
        let capacity = self.capacity();
        if offset > capacity {
            return Err(CursorError::InvalidOffset { offset, capacity });
        }
        self.offset = offset;
        Ok(())
    }

    /// Reads a `u8`.
    pub fn get_u8(&mut self) -> CursorResult<u8> {
        let [byte] = self.take::<1>()?;
        Ok(byte)
    }

    /// Reads an `i8`.
    pub fn get_i8(&mut self) -> CursorResult<i8> {
        Ok(i8::from_be_bytes(self.take::<1>()?))
    }

    /// Reads a big-endian `u16`.
    pub fn get_u16(&mut self) -> CursorResult<u16> {
        Ok(u16::from_be_bytes(self.take::<2>()?))
    }

    /// Reads a big-endian `i16`.
    pub fn get_i16(&mut self) -> CursorResult<i16> {
        Ok(i16::from_be_bytes(self.take::<2>()?))
    }

    /// Reads a big-endian `u32`.
    pub fn get_u32(&mut self) -> CursorResult<u32> {
        Ok(u32::from_be_bytes(self.take::<4>()?))
    }

    /// Reads a big-endian `i32`.
    pub fn get_i32(&mut self) -> CursorResult<i32> {
        Ok(i32::from_be_bytes(self.take::<4>()?))
    }

    /// Reads a big-endian `u64`.
    pub fn get_u64(&mut self) -> CursorResult<u64> {
        Ok(u64::from_be_bytes(self.take::<8>()?))
    }

    /// Reads a big-endian `i64`.
    pub fn get_i64(&mut self) -> CursorResult<i64> {
        Ok(i64::from_be_bytes(self.take::<8>()?))
    }

    /// Reads a big-endian IEEE-754 `f32`.
    pub fn get_f32(&mut self) -> CursorResult<f32> {
        Ok(f32::from_be_bytes(self.take::<4>()?))
    }

    /// Reads a big-endian IEEE-754 `f64`.
    pub fn get_f64(&mut self) -> CursorResult<f64> {
        Ok(f64::from_be_bytes(self.take::<8>()?))
    }

    /// Reads `len` raw bytes.
    pub fn get_bytes(&mut self, len: usize) -> CursorResult<&[u8]> {
        self.ensure(len)?;
        let start = self.offset;
        self.offset += len;
        Ok(&self.buf.as_ref()[start..start + len])
    }

    pub(crate) fn ensure(&self, len: usize) -> CursorResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(CursorError::EndOfBuffer {
                offset: self.offset,
                requested: len,
                available,
            });
        }
        Ok(())
    }

    pub(crate) fn advance(&mut self, len: usize) {
        self.offset += len;
    }

    fn take<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf.as_ref()[self.offset..self.offset + N]);
        self.offset += N;
        Ok(out)
    }
}

impl<B: WriteBuf> Cursor<B> {
    pub(crate) fn buf_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cursor() {
        let cursor = Cursor::new([0u8; 0]);
        assert!(cursor.is_empty());
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut cursor = Cursor::new(&[][..]);
        let err = cursor.get_u8().unwrap_err();
        assert_eq!(
            err,
            CursorError::EndOfBuffer {
                offset: 0,
                requested: 1,
                available: 0,
            }
        );
    }

    #[test]
    fn reads_are_big_endian() {
        let mut cursor = Cursor::new([0x12, 0x34, 0x56, 0x78]);
        assert_eq!(cursor.get_u16().unwrap(), 0x1234);
        assert_eq!(cursor.get_u16().unwrap(), 0x5678);
        cursor.reset();
        assert_eq!(cursor.get_u32().unwrap(), 0x1234_5678);
    }

    #[test]
    fn signed_reads() {
        let mut cursor = Cursor::new([0xFF, 0xFF, 0xFE]);
        assert_eq!(cursor.get_i8().unwrap(), -1);
        assert_eq!(cursor.get_i16().unwrap(), -2);
    }

    #[test]
    fn short_read_does_not_move_offset() {
        let mut cursor = Cursor::new([1u8, 2, 3]);
        cursor.get_u8().unwrap();
        let err = cursor.get_u32().unwrap_err();
        assert!(matches!(
            err,
            CursorError::EndOfBuffer {
                offset: 1,
                requested: 4,
                available: 2,
            }
        ));
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.get_u16().unwrap(), 0x0203);
    }

    #[test]
    fn get_bytes_advances() {
        let mut cursor = Cursor::new(b"abcdef");
        assert_eq!(cursor.get_bytes(2).unwrap(), b"ab");
        assert_eq!(cursor.get_bytes(3).unwrap(), b"cde");
        assert_eq!(cursor.remaining(), 1);
        assert!(cursor.get_bytes(2).is_err());
    }

    #[test]
    fn set_offset_bounds() {
        let mut cursor = Cursor::new([0u8; 4]);
        cursor.set_offset(4).unwrap();
        assert!(cursor.is_empty());
        let err = cursor.set_offset(5).unwrap_err();
        assert_eq!(
            err,
            CursorError::InvalidOffset {
                offset: 5,
                capacity: 4,
            }
        );
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn written_tracks_offset() {
        let mut cursor = Cursor::new([9u8, 8, 7]);
        assert!(cursor.written().is_empty());
        cursor.get_u16().unwrap();
        assert_eq!(cursor.written(), &[9, 8]);
    }
}
