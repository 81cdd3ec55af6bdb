//! Schema-driven encoding and decoding.
//!
//! The schema is walked recursively alongside the value. Nothing about the
//! schema itself is written: property names, tuple arity and fixed lengths
//! are known to both sides.

use std::collections::BTreeMap;

use cursor::{Cursor, ReadBuf, WriteBuf};
use num_traits::ToPrimitive;
use schema::{Primitive, Property, Schema};

use crate::atoms::string::{read_string, write_string};
use crate::atoms::varint::{read_small_var_uint, read_var_uint, write_small_var_uint};
use crate::atoms::{atom_accepts, mismatch, read_atom, write_atom};
use crate::conform::conforms;
use crate::dynamic::{read_at as read_dynamic_at, read_entries, write_dynamic};
use crate::error::{CodecError, CodecResult};
use crate::limits::DecodeLimits;
use crate::value::Value;

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

/// Writes `value` under `schema`.
///
/// The schema is trusted; call [`Schema::validate`] once when building it.
pub fn write_value<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    schema: &Schema,
    value: &Value,
) -> CodecResult<()> {
    match schema {
        Schema::Atom(kind) => write_atom(cursor, kind, value),
        Schema::Array { element, length } => {
            let items = expect_array(schema, value)?;
            match length {
                Some(expected) if *expected != items.len() => {
                    return Err(CodecError::LengthMismatch {
                        expected: *expected,
                        actual: items.len(),
                    })
                }
                Some(_) => {}
                None => write_small_var_uint(cursor, items.len() as u64)?,
            }
            items
                .iter()
                .try_for_each(|item| write_value(cursor, element, item))
        }
        Schema::Tuple(elements) => {
            let items = expect_array(schema, value)?;
            if items.len() != elements.len() {
                return Err(CodecError::LengthMismatch {
                    expected: elements.len(),
                    actual: items.len(),
                });
            }
            write_elements(cursor, elements, items)
        }
        Schema::TuplePartial(required) => {
            let items = expect_array(schema, value)?;
            if items.len() < required.len() {
                return Err(CodecError::LengthMismatch {
                    expected: required.len(),
                    actual: items.len(),
                });
            }
            let (head, tail) = items.split_at(required.len());
            write_elements(cursor, required, head)?;
            write_small_var_uint(cursor, tail.len() as u64)?;
            tail.iter().try_for_each(|item| write_dynamic(cursor, item))
        }
        Schema::Object(properties) => {
            let entries = expect_object(schema, value)?;
            if let Some(key) = entries
                .keys()
                .find(|key| !properties.iter().any(|property| &property.key == *key))
            {
                return Err(CodecError::UnexpectedProperty { key: key.clone() });
            }
            write_properties(cursor, properties, entries)
        }
        Schema::ObjectPartial(properties) => {
            let entries = expect_object(schema, value)?;
            write_properties(cursor, properties, entries)?;
            let extras: Vec<_> = entries
                .iter()
                .filter(|(key, _)| !properties.iter().any(|property| &property.key == *key))
                .collect();
            write_small_var_uint(cursor, extras.len() as u64)?;
            for (key, item) in extras {
                write_string(cursor, key, None)?;
                write_dynamic(cursor, item)?;
            }
            Ok(())
        }
        Schema::Record(values) => {
            let entries = expect_object(schema, value)?;
            write_small_var_uint(cursor, entries.len() as u64)?;
            for (key, item) in entries {
                write_string(cursor, key, None)?;
                write_value(cursor, values, item)?;
            }
            Ok(())
        }
        Schema::Enum(members) => write_enum_index(cursor, members, value),
        Schema::EnumTyped { kind, members } => {
            // Null stands for an absent member and takes the sentinel.
            if !value.is_null() && !atom_accepts(kind, value) {
                return Err(mismatch(kind, value));
            }
            write_enum_index(cursor, members, value)
        }
        Schema::Nullable(inner) => {
            if value.is_null() {
                cursor.set_u8(ABSENT)?;
                return Ok(());
            }
            cursor.set_u8(PRESENT)?;
            write_value(cursor, inner, value)
        }
        Schema::Union(members) => {
            let index = members
                .iter()
                .position(|member| conforms(member, value))
                .ok_or(CodecError::NoMatchingUnionMember {
                    found: value.kind_name(),
                })?;
            write_small_var_uint(cursor, index as u64)?;
            write_value(cursor, &members[index], value)
        }
        Schema::Unknown => write_dynamic(cursor, value),
    }
}

/// Reads a value under `schema` with default limits.
pub fn read_value<B: ReadBuf>(cursor: &mut Cursor<B>, schema: &Schema) -> CodecResult<Value> {
    read_value_with_limits(cursor, schema, &DecodeLimits::default())
}

/// Reads a value under `schema`.
pub fn read_value_with_limits<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    schema: &Schema,
    limits: &DecodeLimits,
) -> CodecResult<Value> {
    read_at(cursor, schema, limits, 0)
}

fn read_at<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    schema: &Schema,
    limits: &DecodeLimits,
    depth: usize,
) -> CodecResult<Value> {
    let value = match schema {
        Schema::Atom(kind) => read_atom(cursor, kind, limits)?,
        Schema::Array { element, length } => {
            limits.check_depth(depth + 1)?;
            let count = match length {
                Some(length) => *length,
                None => read_count(cursor, limits)?,
            };
            let mut items = Vec::with_capacity(count.min(cursor.remaining()));
            for _ in 0..count {
                items.push(read_at(cursor, element, limits, depth + 1)?);
            }
            Value::Array(items)
        }
        Schema::Tuple(elements) => {
            limits.check_depth(depth + 1)?;
            Value::Array(read_elements(cursor, elements, limits, depth + 1)?)
        }
        Schema::TuplePartial(required) => {
            limits.check_depth(depth + 1)?;
            let mut items = read_elements(cursor, required, limits, depth + 1)?;
            let count = read_count(cursor, limits)?;
            items.reserve(count.min(cursor.remaining()));
            for _ in 0..count {
                items.push(read_dynamic_at(cursor, limits, depth + 1)?);
            }
            Value::Array(items)
        }
        Schema::Object(properties) => {
            limits.check_depth(depth + 1)?;
            Value::Object(read_properties(cursor, properties, limits, depth + 1)?)
        }
        Schema::ObjectPartial(properties) => {
            limits.check_depth(depth + 1)?;
            let mut entries = read_properties(cursor, properties, limits, depth + 1)?;
            let count = read_count(cursor, limits)?;
            entries.extend(read_entries(cursor, count, limits, depth + 1)?);
            Value::Object(entries)
        }
        Schema::Record(values) => {
            limits.check_depth(depth + 1)?;
            let count = read_count(cursor, limits)?;
            let mut entries = BTreeMap::new();
            for _ in 0..count {
                let key = read_string(cursor, None, limits)?;
                let item = read_at(cursor, values, limits, depth + 1)?;
                entries.insert(key, item);
            }
            Value::Object(entries)
        }
        Schema::Enum(members) | Schema::EnumTyped { members, .. } => {
            // Any index past the members, however large, reads as null.
            let index = read_var_uint(cursor, limits)?;
            index
                .to_usize()
                .and_then(|index| members.get(index))
                .map_or(Value::Null, Value::from)
        }
        Schema::Nullable(inner) => match cursor.get_u8()? {
            ABSENT => Value::Null,
            PRESENT => read_at(cursor, inner, limits, depth)?,
            flag => return Err(CodecError::InvalidPresenceFlag { flag }),
        },
        Schema::Union(members) => {
            let index = read_small_var_uint(cursor)? as usize;
            let member = members.get(index).ok_or(CodecError::InvalidUnionIndex {
                index,
                members: members.len(),
            })?;
            read_at(cursor, member, limits, depth)?
        }
        Schema::Unknown => read_dynamic_at(cursor, limits, depth)?,
    };
    Ok(value)
}

fn write_elements<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    schemas: &[Schema],
    items: &[Value],
) -> CodecResult<()> {
    schemas
        .iter()
        .zip(items)
        .try_for_each(|(schema, item)| write_value(cursor, schema, item))
}

fn read_elements<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    schemas: &[Schema],
    limits: &DecodeLimits,
    depth: usize,
) -> CodecResult<Vec<Value>> {
    schemas
        .iter()
        .map(|schema| read_at(cursor, schema, limits, depth))
        .collect()
}

/// Writes required properties in schema order. Every key must be present.
fn write_properties<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    properties: &[Property],
    entries: &BTreeMap<String, Value>,
) -> CodecResult<()> {
    if let Some(property) = properties
        .iter()
        .find(|property| !entries.contains_key(&property.key))
    {
        return Err(CodecError::MissingProperty {
            key: property.key.clone(),
        });
    }
    for property in properties {
        if let Some(item) = entries.get(&property.key) {
            write_value(cursor, &property.schema, item)?;
        }
    }
    Ok(())
}

fn read_properties<B: ReadBuf>(
    cursor: &mut Cursor<B>,
    properties: &[Property],
    limits: &DecodeLimits,
    depth: usize,
) -> CodecResult<BTreeMap<String, Value>> {
    let mut entries = BTreeMap::new();
    for property in properties {
        let item = read_at(cursor, &property.schema, limits, depth)?;
        entries.insert(property.key.clone(), item);
    }
    Ok(entries)
}

fn write_enum_index<B: WriteBuf>(
    cursor: &mut Cursor<B>,
    members: &[Primitive],
    value: &Value,
) -> CodecResult<()> {
    // Values outside the member list are written as the `members.len()` sentinel.
    let index = members
        .iter()
        .position(|member| value.matches(member))
        .unwrap_or(members.len());
    write_small_var_uint(cursor, index as u64)
}

fn read_count<B: ReadBuf>(cursor: &mut Cursor<B>, limits: &DecodeLimits) -> CodecResult<usize> {
    let count = read_small_var_uint(cursor)? as usize;
    limits.check_collection_len(count)?;
    Ok(count)
}

fn expect_array<'a>(schema: &Schema, value: &'a Value) -> CodecResult<&'a [Value]> {
    value.as_array().ok_or(CodecError::TypeMismatch {
        expected: schema.kind_name(),
        found: value.kind_name(),
    })
}

fn expect_object<'a>(
    schema: &Schema,
    value: &'a Value,
) -> CodecResult<&'a BTreeMap<String, Value>> {
    value.as_object().ok_or(CodecError::TypeMismatch {
        expected: schema.kind_name(),
        found: value.kind_name(),
    })
}
