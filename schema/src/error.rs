//! Schema validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Bit width of a packed field is outside `1..=32`.
    InvalidBitWidth { bits: u8 },

    /// Duplicate property key within an object schema.
    DuplicateProperty { key: String },

    /// Duplicate member within an enum schema.
    DuplicateEnumMember { index: usize },

    /// Enum member does not fit the declared member kind.
    EnumMemberKindMismatch { index: usize, kind: &'static str },

    /// Member kind cannot describe an enum member.
    InvalidEnumKind { kind: &'static str },

    /// Union with no members.
    EmptyUnion,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBitWidth { bits } => {
                write!(f, "invalid bit width {bits}, expected 1 to 32")
            }
            Self::DuplicateProperty { key } => {
                write!(f, "duplicate property {key:?}")
            }
            Self::DuplicateEnumMember { index } => {
                write!(f, "duplicate enum member at index {index}")
            }
            Self::EnumMemberKindMismatch { index, kind } => {
                write!(f, "enum member at index {index} is not a valid {kind}")
            }
            Self::InvalidEnumKind { kind } => {
                write!(f, "{kind} cannot be used as an enum member kind")
            }
            Self::EmptyUnion => write!(f, "union has no members"),
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_bit_width() {
        let msg = SchemaError::InvalidBitWidth { bits: 33 }.to_string();
        assert!(msg.contains("33"), "should mention the width");
    }

    #[test]
    fn error_display_duplicate_property() {
        let msg = SchemaError::DuplicateProperty {
            key: "name".to_owned(),
        }
        .to_string();
        assert!(msg.contains("\"name\""), "should quote the key");
    }

    #[test]
    fn error_display_member_mismatch() {
        let msg = SchemaError::EnumMemberKindMismatch {
            index: 2,
            kind: "uint8",
        }
        .to_string();
        assert!(msg.contains("index 2"));
        assert!(msg.contains("uint8"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<SchemaError>();
    }
}
