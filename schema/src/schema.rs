//! Schema definitions and validation.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::{AtomKind, Primitive, MAX_BIT_WIDTH};

/// A named property of an object schema.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub key: String,
    pub schema: Schema,
}

impl Property {
    /// Creates a property.
    #[must_use]
    pub fn new(key: impl Into<String>, schema: Schema) -> Self {
        Self {
            key: key.into(),
            schema,
        }
    }
}

/// Describes the shape of a value and selects the encoding for each part.
///
/// Schemas are immutable once built and may be shared across any number of
/// read/write calls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Schema {
    /// A single scalar.
    Atom(AtomKind),

    /// Homogeneous list; a count prefix is written unless `length` is fixed.
    Array {
        element: Box<Schema>,
        #[cfg_attr(feature = "serde", serde(default))]
        length: Option<usize>,
    },

    /// Fixed heterogeneous list, one schema per position.
    Tuple(Vec<Schema>),

    /// Required leading elements followed by a self-describing tail.
    TuplePartial(Vec<Schema>),

    /// Fixed set of keyed properties, written in schema order.
    Object(Vec<Property>),

    /// Required properties followed by self-describing extra entries.
    ObjectPartial(Vec<Property>),

    /// Open-ended string-keyed map with one value schema.
    Record(Box<Schema>),

    /// One of a fixed list of constants, written as its index.
    Enum(Vec<Primitive>),

    /// Like [`Schema::Enum`], with members typed by an atom kind.
    EnumTyped {
        kind: AtomKind,
        members: Vec<Primitive>,
    },

    /// Either null or a value of the inner schema.
    Nullable(Box<Schema>),

    /// A value of one of several schemas, prefixed with the member index.
    Union(Vec<Schema>),

    /// Any self-describing value.
    Unknown,
}

impl Schema {
    /// Creates an atom schema.
    #[must_use]
    pub const fn atom(kind: AtomKind) -> Self {
        Self::Atom(kind)
    }

    #[must_use]
    pub const fn bool() -> Self {
        Self::Atom(AtomKind::Bool)
    }

    #[must_use]
    pub const fn int8() -> Self {
        Self::Atom(AtomKind::Int8)
    }

    #[must_use]
    pub const fn int16() -> Self {
        Self::Atom(AtomKind::Int16)
    }

    #[must_use]
    pub const fn int32() -> Self {
        Self::Atom(AtomKind::Int32)
    }

    #[must_use]
    pub const fn int64() -> Self {
        Self::Atom(AtomKind::Int64)
    }

    #[must_use]
    pub const fn uint8() -> Self {
        Self::Atom(AtomKind::Uint8)
    }

    #[must_use]
    pub const fn uint16() -> Self {
        Self::Atom(AtomKind::Uint16)
    }

    #[must_use]
    pub const fn uint32() -> Self {
        Self::Atom(AtomKind::Uint32)
    }

    #[must_use]
    pub const fn uint64() -> Self {
        Self::Atom(AtomKind::Uint64)
    }

    #[must_use]
    pub const fn float32() -> Self {
        Self::Atom(AtomKind::Float32)
    }

    #[must_use]
    pub const fn float64() -> Self {
        Self::Atom(AtomKind::Float64)
    }

    #[must_use]
    pub const fn var_uint() -> Self {
        Self::Atom(AtomKind::VarUint)
    }

    #[must_use]
    pub const fn small_var_uint() -> Self {
        Self::Atom(AtomKind::SmallVarUint)
    }

    #[must_use]
    pub const fn var_int() -> Self {
        Self::Atom(AtomKind::VarInt)
    }

    #[must_use]
    pub const fn small_var_int() -> Self {
        Self::Atom(AtomKind::SmallVarInt)
    }

    #[must_use]
    pub const fn decimal() -> Self {
        Self::Atom(AtomKind::Decimal)
    }

    /// Creates a bit-packed field schema with the given widths.
    #[must_use]
    pub fn bits(widths: impl Into<Vec<u8>>) -> Self {
        Self::Atom(AtomKind::bits(widths))
    }

    /// Creates a count-prefixed boolean bit vector schema.
    #[must_use]
    pub const fn bit_vec() -> Self {
        Self::Atom(AtomKind::BitVec)
    }

    #[must_use]
    pub const fn string() -> Self {
        Self::Atom(AtomKind::string())
    }

    #[must_use]
    pub const fn fixed_string(length: usize) -> Self {
        Self::Atom(AtomKind::fixed_string(length))
    }

    #[must_use]
    pub const fn string256() -> Self {
        Self::Atom(AtomKind::string256())
    }

    /// Creates a count-prefixed array schema.
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array {
            element: Box::new(element),
            length: None,
        }
    }

    /// Creates an array schema of exactly `length` elements, without a count.
    #[must_use]
    pub fn fixed_array(element: Self, length: usize) -> Self {
        Self::Array {
            element: Box::new(element),
            length: Some(length),
        }
    }

    #[must_use]
    pub fn tuple(elements: impl Into<Vec<Self>>) -> Self {
        Self::Tuple(elements.into())
    }

    #[must_use]
    pub fn tuple_partial(required: impl Into<Vec<Self>>) -> Self {
        Self::TuplePartial(required.into())
    }

    #[must_use]
    pub fn object(properties: impl Into<Vec<Property>>) -> Self {
        Self::Object(properties.into())
    }

    #[must_use]
    pub fn object_partial(required: impl Into<Vec<Property>>) -> Self {
        Self::ObjectPartial(required.into())
    }

    #[must_use]
    pub fn record(values: Self) -> Self {
        Self::Record(Box::new(values))
    }

    #[must_use]
    pub fn enumeration(members: impl Into<Vec<Primitive>>) -> Self {
        Self::Enum(members.into())
    }

    #[must_use]
    pub fn enum_typed(kind: AtomKind, members: impl Into<Vec<Primitive>>) -> Self {
        Self::EnumTyped {
            kind,
            members: members.into(),
        }
    }

    #[must_use]
    pub fn nullable(inner: Self) -> Self {
        Self::Nullable(Box::new(inner))
    }

    #[must_use]
    pub fn union(members: impl Into<Vec<Self>>) -> Self {
        Self::Union(members.into())
    }

    #[must_use]
    pub const fn unknown() -> Self {
        Self::Unknown
    }

    /// Returns a short lowercase name of the schema's variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Atom(kind) => kind.name(),
            Self::Array { .. } => "array",
            Self::Tuple(_) => "tuple",
            Self::TuplePartial(_) => "partial tuple",
            Self::Object(_) => "object",
            Self::ObjectPartial(_) => "partial object",
            Self::Record(_) => "record",
            Self::Enum(_) => "enum",
            Self::EnumTyped { .. } => "typed enum",
            Self::Nullable(_) => "nullable",
            Self::Union(_) => "union",
            Self::Unknown => "unknown",
        }
    }

    /// Validates schema invariants, recursively.
    pub fn validate(&self) -> SchemaResult<()> {
        match self {
            Self::Atom(kind) => validate_atom(kind),
            Self::Array { element, .. } => element.validate(),
            Self::Record(inner) | Self::Nullable(inner) => inner.validate(),
            Self::Tuple(elements) | Self::TuplePartial(elements) => {
                elements.iter().try_for_each(Self::validate)
            }
            Self::Object(properties) | Self::ObjectPartial(properties) => {
                validate_properties(properties)
            }
            Self::Enum(members) => validate_members(members),
            Self::EnumTyped { kind, members } => {
                if !kind.is_enum_kind() {
                    return Err(SchemaError::InvalidEnumKind { kind: kind.name() });
                }
                validate_atom(kind)?;
                if let Some(index) = members.iter().position(|member| !kind.admits(member)) {
                    return Err(SchemaError::EnumMemberKindMismatch {
                        index,
                        kind: kind.name(),
                    });
                }
                validate_members(members)
            }
            Self::Union(members) => {
                if members.is_empty() {
                    return Err(SchemaError::EmptyUnion);
                }
                members.iter().try_for_each(Self::validate)
            }
            Self::Unknown => Ok(()),
        }
    }
}

fn validate_atom(kind: &AtomKind) -> SchemaResult<()> {
    if let AtomKind::Bits { widths } = kind {
        if let Some(&bits) = widths
            .iter()
            .find(|&&bits| bits == 0 || bits > MAX_BIT_WIDTH)
        {
            return Err(SchemaError::InvalidBitWidth { bits });
        }
    }
    Ok(())
}

fn validate_properties(properties: &[Property]) -> SchemaResult<()> {
    let mut keys = HashSet::new();
    for property in properties {
        if !keys.insert(property.key.as_str()) {
            return Err(SchemaError::DuplicateProperty {
                key: property.key.clone(),
            });
        }
        property.schema.validate()?;
    }
    Ok(())
}

fn validate_members(members: &[Primitive]) -> SchemaResult<()> {
    for (index, member) in members.iter().enumerate() {
        if members[..index].contains(member) {
            return Err(SchemaError::DuplicateEnumMember { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Schema {
        Schema::object([
            Property::new("name", Schema::string()),
            Property::new("age", Schema::uint8()),
            Property::new("tags", Schema::array(Schema::string())),
        ])
    }

    #[test]
    fn constructors_build_expected_variants() {
        assert_eq!(Schema::uint8(), Schema::Atom(AtomKind::Uint8));
        assert_eq!(
            Schema::fixed_array(Schema::bool(), 4),
            Schema::Array {
                element: Box::new(Schema::bool()),
                length: Some(4),
            }
        );
        assert!(matches!(Schema::record(Schema::unknown()), Schema::Record(_)));
        assert!(matches!(
            Schema::enumeration([Primitive::from("a"), Primitive::from("b")]),
            Schema::Enum(members) if members.len() == 2
        ));
    }

    #[test]
    fn nested_schema_validates() {
        let schema = Schema::union([
            person(),
            Schema::nullable(Schema::tuple([Schema::var_int(), Schema::decimal()])),
        ]);
        schema.validate().unwrap();
    }

    #[test]
    fn rejects_invalid_bit_width() {
        let err = Schema::bits([4, 0]).validate().unwrap_err();
        assert_eq!(err, SchemaError::InvalidBitWidth { bits: 0 });
        let err = Schema::array(Schema::bits([33])).validate().unwrap_err();
        assert_eq!(err, SchemaError::InvalidBitWidth { bits: 33 });
    }

    #[test]
    fn rejects_duplicate_property() {
        let schema = Schema::object_partial([
            Property::new("id", Schema::uint32()),
            Property::new("id", Schema::string()),
        ]);
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateProperty { key } if key == "id"));
    }

    #[test]
    fn rejects_duplicate_enum_member() {
        let schema = Schema::enumeration([
            Primitive::from("a"),
            Primitive::Null,
            Primitive::from("a"),
        ]);
        let err = schema.validate().unwrap_err();
        assert_eq!(err, SchemaError::DuplicateEnumMember { index: 2 });
    }

    #[test]
    fn rejects_mistyped_enum_member() {
        let schema = Schema::enum_typed(AtomKind::Uint8, [Primitive::Int(1), Primitive::Int(300)]);
        let err = schema.validate().unwrap_err();
        assert_eq!(
            err,
            SchemaError::EnumMemberKindMismatch {
                index: 1,
                kind: "uint8",
            }
        );
    }

    #[test]
    fn rejects_bits_enum_kind() {
        let schema = Schema::enum_typed(AtomKind::bits([3]), [Primitive::Int(1)]);
        let err = schema.validate().unwrap_err();
        assert_eq!(err, SchemaError::InvalidEnumKind { kind: "bits" });
    }

    #[test]
    fn rejects_empty_union() {
        let err = Schema::tuple([Schema::Union(Vec::new())]).validate().unwrap_err();
        assert_eq!(err, SchemaError::EmptyUnion);
    }

    #[test]
    fn kind_names() {
        assert_eq!(person().kind_name(), "object");
        assert_eq!(Schema::var_uint().kind_name(), "varuint");
        assert_eq!(Schema::unknown().kind_name(), "unknown");
    }
}
