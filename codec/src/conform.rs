//! Structural conformance of values to schemas.

use schema::Schema;

use crate::atoms::atom_accepts;
use crate::dynamic::is_classifiable;
use crate::value::Value;

/// Returns `true` if `value` can be written under `schema`.
///
/// Mirrors the write rules: kinds, integer ranges, fixed lengths and the
/// property sets of strict objects. Union members are tried in order by this
/// check when writing.
#[must_use]
pub fn conforms(schema: &Schema, value: &Value) -> bool {
    match schema {
        Schema::Atom(kind) => atom_accepts(kind, value),
        Schema::Array { element, length } => value.as_array().map_or(false, |items| {
            length.map_or(true, |length| items.len() == length)
                && items.iter().all(|item| conforms(element, item))
        }),
        Schema::Tuple(elements) => value.as_array().map_or(false, |items| {
            items.len() == elements.len() && all_conform(elements, items)
        }),
        Schema::TuplePartial(required) => value.as_array().map_or(false, |items| {
            items.len() >= required.len()
                && all_conform(required, &items[..required.len()])
                && items[required.len()..].iter().all(is_classifiable)
        }),
        Schema::Object(properties) => value.as_object().map_or(false, |entries| {
            entries.len() == properties.len()
                && properties.iter().all(|property| {
                    entries
                        .get(&property.key)
                        .map_or(false, |item| conforms(&property.schema, item))
                })
        }),
        Schema::ObjectPartial(properties) => value.as_object().map_or(false, |entries| {
            properties.iter().all(|property| {
                entries
                    .get(&property.key)
                    .map_or(false, |item| conforms(&property.schema, item))
            }) && entries
                .iter()
                .filter(|(key, _)| !properties.iter().any(|property| &property.key == *key))
                .all(|(_, item)| is_classifiable(item))
        }),
        Schema::Record(values) => value
            .as_object()
            .map_or(false, |entries| entries.values().all(|item| conforms(values, item))),
        Schema::Enum(members) | Schema::EnumTyped { members, .. } => {
            members.iter().any(|member| value.matches(member))
        }
        Schema::Nullable(inner) => value.is_null() || conforms(inner, value),
        Schema::Union(members) => members.iter().any(|member| conforms(member, value)),
        Schema::Unknown => is_classifiable(value),
    }
}

fn all_conform(schemas: &[Schema], items: &[Value]) -> bool {
    schemas
        .iter()
        .zip(items)
        .all(|(schema, item)| conforms(schema, item))
}
