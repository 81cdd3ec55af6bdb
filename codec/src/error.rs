//! Error types for codec operations.

use std::fmt;

use cursor::CursorError;
use schema::SchemaError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Cursor error (buffer exhausted or bad offset).
    Cursor(CursorError),

    /// The schema driving the call is invalid.
    Schema(SchemaError),

    /// Value does not fit the encoding selected for it.
    OutOfRange { kind: &'static str, value: String },

    /// Decoded varint does not fit the requested tier.
    VarintOverflow { kind: &'static str },

    /// Value has the wrong runtime kind for the schema.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Fixed-length array, bit field list or string has the wrong length.
    LengthMismatch { expected: usize, actual: usize },

    /// Object value lacks a property required by the schema.
    MissingProperty { key: String },

    /// Object value has a property the schema does not declare.
    UnexpectedProperty { key: String },

    /// Value cannot be represented as an exact decimal.
    InvalidDecimal { value: String },

    /// Decoded code point is not a Unicode scalar value.
    InvalidCodePoint { code_point: u32 },

    /// Nullable presence byte was neither 0 nor 1.
    InvalidPresenceFlag { flag: u8 },

    /// Decoded union index has no member.
    InvalidUnionIndex { index: usize, members: usize },

    /// No union member accepts the value.
    NoMatchingUnionMember { found: &'static str },

    /// Value has no self-describing encoding.
    Unclassifiable { kind: &'static str },

    /// Decode limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Depth,
    CollectionLen,
    StringLen,
    VarintLen,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor(e) => write!(f, "cursor error: {e}"),
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::OutOfRange { kind, value } => {
                write!(f, "value {value} is out of range for {kind}")
            }
            Self::VarintOverflow { kind } => {
                write!(f, "decoded varint does not fit {kind}")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} but got {found}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected length {expected}, got {actual}")
            }
            Self::MissingProperty { key } => {
                write!(f, "missing property {key:?}")
            }
            Self::UnexpectedProperty { key } => {
                write!(f, "unexpected property {key:?}")
            }
            Self::InvalidDecimal { value } => {
                write!(f, "{value} is not a valid decimal")
            }
            Self::InvalidCodePoint { code_point } => {
                write!(f, "invalid code point 0x{code_point:X}")
            }
            Self::InvalidPresenceFlag { flag } => {
                write!(f, "invalid presence flag {flag}, expected 0 or 1")
            }
            Self::InvalidUnionIndex { index, members } => {
                write!(f, "union index {index} out of range for {members} members")
            }
            Self::NoMatchingUnionMember { found } => {
                write!(f, "no union member accepts {found}")
            }
            Self::Unclassifiable { kind } => {
                write!(f, "{kind} has no self-describing encoding")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Depth => "depth",
            Self::CollectionLen => "collection length",
            Self::StringLen => "string length",
            Self::VarintLen => "varint length",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cursor(e) => Some(e),
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CursorError> for CodecError {
    fn from(err: CursorError) -> Self {
        Self::Cursor(err)
    }
}

impl From<SchemaError> for CodecError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}
