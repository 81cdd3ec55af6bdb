//! Conversion between JSON documents and codec values.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use bigdecimal::BigDecimal;
use codec::Value;
use num_bigint::BigInt;
use schema::{AtomKind, Schema};
use serde_json::{Map, Number};

/// Converts a JSON document into a value without schema guidance.
///
/// Integers become [`Value::Int`] (or [`Value::BigInt`] above `i64::MAX`),
/// other numbers become [`Value::Float`].
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(v) => Value::Bool(*v),
        serde_json::Value::Number(n) => number_to_value(n),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), json_to_value(item)))
                .collect(),
        ),
    }
}

/// Converts a JSON document into a value shaped by `schema`.
///
/// JSON has no exact decimals or unbounded integers, so strings are accepted
/// wherever the schema asks for a decimal or an arbitrary-precision varint.
/// Everything else converts as [`json_to_value`] does.
pub fn json_to_value_for(schema: &Schema, json: &serde_json::Value) -> Result<Value> {
    match (schema, json) {
        (Schema::Atom(kind), serde_json::Value::String(text)) => string_atom(kind, text),
        (Schema::Array { element, .. }, serde_json::Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                json_to_value_for(element, item).with_context(|| format!("element {index}"))
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        (
            Schema::Tuple(elements) | Schema::TuplePartial(elements),
            serde_json::Value::Array(items),
        ) => {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| match elements.get(index) {
                    Some(element) => json_to_value_for(element, item)
                        .with_context(|| format!("element {index}")),
                    None => Ok(json_to_value(item)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        (
            Schema::Object(properties) | Schema::ObjectPartial(properties),
            serde_json::Value::Object(entries),
        ) => {
            let mut out = BTreeMap::new();
            for (key, item) in entries {
                let value = match properties.iter().find(|property| &property.key == key) {
                    Some(property) => json_to_value_for(&property.schema, item)
                        .with_context(|| format!("property `{key}`"))?,
                    None => json_to_value(item),
                };
                out.insert(key.clone(), value);
            }
            Ok(Value::Object(out))
        }
        (Schema::Record(values), serde_json::Value::Object(entries)) => {
            let mut out = BTreeMap::new();
            for (key, item) in entries {
                let value =
                    json_to_value_for(values, item).with_context(|| format!("entry `{key}`"))?;
                out.insert(key.clone(), value);
            }
            Ok(Value::Object(out))
        }
        (Schema::Nullable(inner), json) if !json.is_null() => json_to_value_for(inner, json),
        _ => Ok(json_to_value(json)),
    }
}

fn string_atom(kind: &AtomKind, text: &str) -> Result<Value> {
    match kind {
        AtomKind::Decimal => BigDecimal::from_str(text)
            .map(Value::Decimal)
            .with_context(|| format!("parse decimal `{text}`")),
        AtomKind::VarUint | AtomKind::VarInt | AtomKind::Uint64 | AtomKind::Int64 => {
            BigInt::from_str(text)
                .map(Value::from)
                .with_context(|| format!("parse integer `{text}`"))
        }
        _ => Ok(Value::String(text.to_owned())),
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(v) = n.as_i64() {
        Value::Int(v)
    } else if let Some(v) = n.as_u64() {
        Value::from(v)
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Converts a value into a JSON document.
///
/// Integers outside the `i64`/`u64` range and decimals become strings so no
/// precision is lost. Non-finite floats have no JSON form and are rejected.
pub fn value_to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(v) => serde_json::Value::Bool(*v),
        Value::Int(v) => serde_json::Value::from(*v),
        Value::BigInt(v) => match u64::try_from(v) {
            Ok(v) => serde_json::Value::from(v),
            Err(_) => serde_json::Value::String(v.to_string()),
        },
        Value::Float(v) => Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .ok_or_else(|| anyhow!("float {v} has no JSON representation"))?,
        Value::Decimal(v) => serde_json::Value::String(v.to_string()),
        Value::String(v) => serde_json::Value::String(v.clone()),
        Value::Array(items) => serde_json::Value::Array(
            items.iter().map(value_to_json).collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(entries) => {
            let mut map = Map::new();
            for (key, item) in entries {
                map.insert(key.clone(), value_to_json(item)?);
            }
            serde_json::Value::Object(map)
        }
    })
}

/// Parses and validates a schema from its JSON form.
pub fn load_schema(json: &str) -> Result<Schema> {
    let schema: Schema = serde_json::from_str(json).context("parse schema json")?;
    if let Err(err) = schema.validate() {
        bail!("schema validation failed: {err}");
    }
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::Property;
    use serde_json::json;

    #[test]
    fn plain_conversion() {
        let value = json_to_value(&json!({"a": [1, -2, 1.5, null, true, "s"]}));
        let expected: Value = [(
            "a",
            Value::Array(vec![
                Value::Int(1),
                Value::Int(-2),
                Value::Float(1.5),
                Value::Null,
                Value::Bool(true),
                Value::from("s"),
            ]),
        )]
        .into_iter()
        .collect();
        assert_eq!(value, expected);
    }

    #[test]
    fn large_unsigned_becomes_bigint() {
        let value = json_to_value(&json!(u64::MAX));
        assert_eq!(value, Value::from(u64::MAX));
        assert!(matches!(value, Value::BigInt(_)));
        assert_eq!(value_to_json(&value).unwrap(), json!(u64::MAX));
    }

    #[test]
    fn schema_guided_strings() {
        let schema = Schema::object([
            Property::new("price", Schema::decimal()),
            Property::new("big", Schema::var_uint()),
            Property::new("name", Schema::string()),
        ]);
        let value = json_to_value_for(
            &schema,
            &json!({
                "price": "12.50",
                "big": "340282366920938463463374607431768211456",
                "name": "x",
            }),
        )
        .unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(
            object["price"],
            Value::Decimal(BigDecimal::from_str("12.50").unwrap())
        );
        assert_eq!(
            object["big"],
            Value::from(BigInt::from(1u8) << 128)
        );
        assert_eq!(object["name"], Value::from("x"));
    }

    #[test]
    fn schema_guided_errors_carry_context() {
        let schema = Schema::array(Schema::decimal());
        let err = json_to_value_for(&schema, &json!(["1.0", "nope"])).unwrap_err();
        assert!(format!("{err:#}").contains("element 1"));
    }

    #[test]
    fn big_values_render_as_strings() {
        let big = Value::from(-(BigInt::from(1u8) << 70u32));
        assert_eq!(
            value_to_json(&big).unwrap(),
            json!("-1180591620717411303424")
        );
        let decimal = Value::Decimal(BigDecimal::from_str("-0.25").unwrap());
        assert_eq!(value_to_json(&decimal).unwrap(), json!("-0.25"));
        assert!(value_to_json(&Value::Float(f64::NAN)).is_err());
    }

    #[test]
    fn load_schema_validates() {
        let schema = load_schema(r#"{"array": {"element": {"atom": "uint8"}}}"#).unwrap();
        assert_eq!(schema, Schema::array(Schema::uint8()));

        let err = load_schema(r#"{"atom": {"bits": {"widths": [0]}}}"#).unwrap_err();
        assert!(err.to_string().contains("validation"));
        assert!(load_schema("{").is_err());
    }
}
