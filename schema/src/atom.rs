//! Atom kinds: the scalar encodings a schema leaf can select.

use crate::Primitive;

/// Largest magnitude accepted by the 32-bit-safe varint tiers, exclusive.
pub const SMALL_VARINT_LIMIT: u64 = 1 << 31;

/// Widest field accepted by [`AtomKind::Bits`].
pub const MAX_BIT_WIDTH: u8 = 32;

/// The encoding for a single scalar (representation only).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AtomKind {
    /// Boolean (one byte).
    Bool,

    /// Signed integers with fixed byte width.
    Int8,
    Int16,
    Int32,
    Int64,

    /// Unsigned integers with fixed byte width.
    Uint8,
    Uint16,
    Uint32,
    Uint64,

    /// IEEE-754 floats.
    Float32,
    Float64,

    /// Variable-length unsigned integer of arbitrary precision.
    VarUint,

    /// Variable-length unsigned integer limited to `0..2^31`.
    SmallVarUint,

    /// Variable-length sign-magnitude integer of arbitrary precision.
    VarInt,

    /// Variable-length sign-magnitude integer limited to `-(2^31 - 1)..2^31`.
    SmallVarInt,

    /// Exact decimal number.
    Decimal,

    /// Bit-packed unsigned fields, LSB-first. Widths are not transmitted.
    Bits { widths: Vec<u8> },

    /// Count-prefixed list of booleans packed one bit each, LSB-first.
    BitVec,

    /// String of code points, each written as a varint.
    String {
        /// Fixed character count; when absent a count prefix is written.
        #[cfg_attr(feature = "serde", serde(default))]
        length: Option<usize>,
    },

    /// String of single-byte code units (U+0000 to U+00FF).
    String256 {
        /// Fixed character count; when absent a count prefix is written.
        #[cfg_attr(feature = "serde", serde(default))]
        length: Option<usize>,
    },
}

impl AtomKind {
    /// Creates a bit-packed field kind.
    #[must_use]
    pub fn bits(widths: impl Into<Vec<u8>>) -> Self {
        Self::Bits {
            widths: widths.into(),
        }
    }

    /// Creates a length-prefixed code-point string kind.
    #[must_use]
    pub const fn string() -> Self {
        Self::String { length: None }
    }

    /// Creates a fixed-length code-point string kind.
    #[must_use]
    pub const fn fixed_string(length: usize) -> Self {
        Self::String {
            length: Some(length),
        }
    }

    /// Creates a length-prefixed single-byte string kind.
    #[must_use]
    pub const fn string256() -> Self {
        Self::String256 { length: None }
    }

    /// Returns a short lowercase name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::VarUint => "varuint",
            Self::SmallVarUint => "small varuint",
            Self::VarInt => "varint",
            Self::SmallVarInt => "small varint",
            Self::Decimal => "decimal",
            Self::Bits { .. } => "bits",
            Self::BitVec => "bitvec",
            Self::String { .. } => "string",
            Self::String256 { .. } => "string256",
        }
    }

    /// Returns the inclusive integer range of an integer kind.
    ///
    /// Unbounded kinds report `None` on the open side.
    #[must_use]
    pub const fn integer_range(&self) -> Option<(Option<i128>, Option<i128>)> {
        let small = SMALL_VARINT_LIMIT as i128;
        let range = match self {
            Self::Int8 => (Some(i8::MIN as i128), Some(i8::MAX as i128)),
            Self::Int16 => (Some(i16::MIN as i128), Some(i16::MAX as i128)),
            Self::Int32 => (Some(i32::MIN as i128), Some(i32::MAX as i128)),
            Self::Int64 => (Some(i64::MIN as i128), Some(i64::MAX as i128)),
            Self::Uint8 => (Some(0), Some(u8::MAX as i128)),
            Self::Uint16 => (Some(0), Some(u16::MAX as i128)),
            Self::Uint32 => (Some(0), Some(u32::MAX as i128)),
            Self::Uint64 => (Some(0), Some(u64::MAX as i128)),
            Self::SmallVarUint => (Some(0), Some(small - 1)),
            Self::SmallVarInt => (Some(1 - small), Some(small - 1)),
            Self::VarUint => (Some(0), None),
            Self::VarInt => (None, None),
            _ => return None,
        };
        Some(range)
    }

    /// Returns `true` if the kind can describe enum members.
    #[must_use]
    pub const fn is_enum_kind(&self) -> bool {
        !matches!(self, Self::Bits { .. } | Self::BitVec)
    }

    /// Returns `true` if `member` is a valid value of this kind.
    #[must_use]
    pub fn admits(&self, member: &Primitive) -> bool {
        match (self, member) {
            (Self::Bool, Primitive::Bool(_)) => true,
            (Self::Float32 | Self::Float64, Primitive::Int(_) | Primitive::Float(_)) => true,
            (Self::Decimal, Primitive::Int(_)) => true,
            (Self::Decimal, Primitive::Float(value)) => value.is_finite(),
            (Self::String { length }, Primitive::String(value)) => {
                length.map_or(true, |length| value.chars().count() == length)
            }
            (Self::String256 { length }, Primitive::String(value)) => {
                value.chars().all(|c| u32::from(c) <= 0xFF)
                    && length.map_or(true, |length| value.chars().count() == length)
            }
            (_, Primitive::Int(value)) => {
                self.integer_range().map_or(false, |(min, max)| {
                    let value = i128::from(*value);
                    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
                })
            }
            _ => false,
        }
    }
}
