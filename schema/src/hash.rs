//! Deterministic schema fingerprinting.

use blake3::Hasher;

use crate::{AtomKind, Primitive, Property, Schema};

/// Computes a deterministic 64-bit fingerprint of a schema.
///
/// Two schemas with the same structure always hash equally; any change to
/// variant, order, widths, keys or members changes the fingerprint. The value
/// is never written to the wire.
#[must_use]
pub fn schema_hash(schema: &Schema) -> u64 {
    let mut hasher = Hasher::new();
    write_schema(&mut hasher, schema);

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

fn write_schema(hasher: &mut Hasher, schema: &Schema) {
    match schema {
        Schema::Atom(kind) => {
            write_u8(hasher, 0);
            write_atom(hasher, kind);
        }
        Schema::Array { element, length } => {
            write_u8(hasher, 1);
            write_optional_len(hasher, *length);
            write_schema(hasher, element);
        }
        Schema::Tuple(elements) => {
            write_u8(hasher, 2);
            write_schemas(hasher, elements);
        }
        Schema::TuplePartial(elements) => {
            write_u8(hasher, 3);
            write_schemas(hasher, elements);
        }
        Schema::Object(properties) => {
            write_u8(hasher, 4);
            write_properties(hasher, properties);
        }
        Schema::ObjectPartial(properties) => {
            write_u8(hasher, 5);
            write_properties(hasher, properties);
        }
        Schema::Record(values) => {
            write_u8(hasher, 6);
            write_schema(hasher, values);
        }
        Schema::Enum(members) => {
            write_u8(hasher, 7);
            write_members(hasher, members);
        }
        Schema::EnumTyped { kind, members } => {
            write_u8(hasher, 8);
            write_atom(hasher, kind);
            write_members(hasher, members);
        }
        Schema::Nullable(inner) => {
            write_u8(hasher, 9);
            write_schema(hasher, inner);
        }
        Schema::Union(members) => {
            write_u8(hasher, 10);
            write_schemas(hasher, members);
        }
        Schema::Unknown => {
            write_u8(hasher, 11);
        }
    }
}

fn write_atom(hasher: &mut Hasher, kind: &AtomKind) {
    let tag = match kind {
        AtomKind::Bool => 0,
        AtomKind::Int8 => 1,
        AtomKind::Int16 => 2,
        AtomKind::Int32 => 3,
        AtomKind::Int64 => 4,
        AtomKind::Uint8 => 5,
        AtomKind::Uint16 => 6,
        AtomKind::Uint32 => 7,
        AtomKind::Uint64 => 8,
        AtomKind::Float32 => 9,
        AtomKind::Float64 => 10,
        AtomKind::VarUint => 11,
        AtomKind::SmallVarUint => 12,
        AtomKind::VarInt => 13,
        AtomKind::SmallVarInt => 14,
        AtomKind::Decimal => 15,
        AtomKind::BitVec => 19,
        AtomKind::Bits { widths } => {
            write_u8(hasher, 16);
            write_len(hasher, widths.len());
            hasher.update(widths);
            return;
        }
        AtomKind::String { length } => {
            write_u8(hasher, 17);
            write_optional_len(hasher, *length);
            return;
        }
        AtomKind::String256 { length } => {
            write_u8(hasher, 18);
            write_optional_len(hasher, *length);
            return;
        }
    };
    write_u8(hasher, tag);
}

fn write_schemas(hasher: &mut Hasher, schemas: &[Schema]) {
    write_len(hasher, schemas.len());
    for schema in schemas {
        write_schema(hasher, schema);
    }
}

fn write_properties(hasher: &mut Hasher, properties: &[Property]) {
    write_len(hasher, properties.len());
    for property in properties {
        write_str(hasher, &property.key);
        write_schema(hasher, &property.schema);
    }
}

fn write_members(hasher: &mut Hasher, members: &[Primitive]) {
    write_len(hasher, members.len());
    for member in members {
        match member {
            Primitive::Null => write_u8(hasher, 0),
            Primitive::Bool(value) => {
                write_u8(hasher, 1);
                write_u8(hasher, u8::from(*value));
            }
            Primitive::Int(value) => {
                write_u8(hasher, 2);
                hasher.update(&value.to_le_bytes());
            }
            Primitive::Float(value) => {
                write_u8(hasher, 3);
                hasher.update(&value.to_bits().to_le_bytes());
            }
            Primitive::String(value) => {
                write_u8(hasher, 4);
                write_str(hasher, value);
            }
        }
    }
}

fn write_optional_len(hasher: &mut Hasher, length: Option<usize>) {
    match length {
        Some(length) => {
            write_u8(hasher, 1);
            write_len(hasher, length);
        }
        None => write_u8(hasher, 0),
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_len(hasher: &mut Hasher, value: usize) {
    hasher.update(&(value as u64).to_le_bytes());
}
