//! Error types for cursor operations.

use std::fmt;

/// Result type for cursor operations.
pub type CursorResult<T> = Result<T, CursorError>;

/// Errors that can occur while reading or writing through a [`Cursor`](crate::Cursor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Attempted to access bytes past the end of the buffer.
    EndOfBuffer {
        /// Offset at which the access started.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available from `offset`.
        available: usize,
    },

    /// Attempted to move the cursor outside the buffer.
    InvalidOffset {
        /// The offset that was requested.
        offset: usize,
        /// Buffer capacity in bytes.
        capacity: usize,
    },
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfBuffer {
                offset,
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to access {requested} bytes at offset {offset} but only {available} bytes available"
                )
            }
            Self::InvalidOffset { offset, capacity } => {
                write!(
                    f,
                    "offset {offset} is outside a buffer of {capacity} bytes"
                )
            }
        }
    }
}

impl std::error::Error for CursorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_end_of_buffer() {
        let err = CursorError::EndOfBuffer {
            offset: 6,
            requested: 4,
            available: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("4 bytes"), "should mention requested bytes");
        assert!(msg.contains("2 bytes"), "should mention available bytes");
        assert!(msg.contains("offset 6"), "should mention offset");
    }

    #[test]
    fn error_display_invalid_offset() {
        let err = CursorError::InvalidOffset {
            offset: 40,
            capacity: 32,
        };
        let msg = err.to_string();
        assert!(msg.contains("40"), "should mention offset");
        assert!(msg.contains("32"), "should mention capacity");
    }

    #[test]
    fn error_equality() {
        let err1 = CursorError::EndOfBuffer {
            offset: 0,
            requested: 8,
            available: 3,
        };
        let err2 = err1.clone();
        let err3 = CursorError::EndOfBuffer {
            offset: 0,
            requested: 8,
            available: 4,
        };
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<CursorError>();
    }
}
