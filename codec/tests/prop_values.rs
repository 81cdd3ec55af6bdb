use std::collections::BTreeMap;

use codec::{read_dynamic, read_value, write_dynamic, write_value, Value};
use cursor::Cursor;
use proptest::prelude::*;
use schema::{Property, Schema};

fn dynamic_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("NaN never compares equal", |v| !v.is_nan())
            .prop_map(Value::Float),
        ".{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{0,6}", inner, 0..6).prop_map(Value::Object),
        ]
    })
}

fn record() -> (Schema, impl Strategy<Value = Value>) {
    let schema = Schema::object([
        Property::new("id", Schema::var_uint()),
        Property::new("delta", Schema::small_var_int()),
        Property::new("flags", Schema::bits([1, 3, 12])),
        Property::new("label", Schema::nullable(Schema::string())),
        Property::new("samples", Schema::array(Schema::float32())),
    ]);
    let strategy = (
        any::<u64>(),
        -2_147_483_647i64..=2_147_483_647,
        (0u32..2, 0u32..8, 0u32..4096),
        prop::option::of(".{0,8}"),
        prop::collection::vec(any::<i16>(), 0..8),
    )
        .prop_map(|(id, delta, (a, b, c), label, samples)| {
            let mut entries = BTreeMap::new();
            entries.insert("id".to_owned(), Value::from(id));
            entries.insert("delta".to_owned(), Value::Int(delta));
            entries.insert(
                "flags".to_owned(),
                Value::Array(vec![Value::from(a), Value::from(b), Value::from(c)]),
            );
            entries.insert("label".to_owned(), label.map_or(Value::Null, Value::String));
            entries.insert(
                "samples".to_owned(),
                Value::Array(
                    samples
                        .into_iter()
                        .map(|v| Value::Float(f64::from(v)))
                        .collect(),
                ),
            );
            Value::Object(entries)
        });
    (schema, strategy)
}

proptest! {
    #[test]
    fn prop_dynamic_roundtrip(value in dynamic_value()) {
        let mut cursor = Cursor::new(vec![0u8; 8192]);
        write_dynamic(&mut cursor, &value).unwrap();
        let len = cursor.offset();
        cursor.reset();
        let read = read_dynamic(&mut cursor).unwrap();
        prop_assert_eq!(cursor.offset(), len);
        prop_assert_eq!(read.kind_name(), value.kind_name());
        prop_assert_eq!(read, value);
    }

    #[test]
    fn prop_unknown_schema_matches_dynamic(value in dynamic_value()) {
        let mut typed = Cursor::new(vec![0u8; 8192]);
        write_value(&mut typed, &Schema::unknown(), &value).unwrap();
        let mut dynamic = Cursor::new(vec![0u8; 8192]);
        write_dynamic(&mut dynamic, &value).unwrap();
        prop_assert_eq!(typed.written(), dynamic.written());
    }

    #[test]
    fn prop_schema_roundtrip(value in record().1) {
        let (schema, _) = record();
        let mut cursor = Cursor::new(vec![0u8; 1024]);
        write_value(&mut cursor, &schema, &value).unwrap();
        let len = cursor.offset();
        cursor.reset();
        prop_assert_eq!(read_value(&mut cursor, &schema).unwrap(), value);
        prop_assert_eq!(cursor.offset(), len);
    }

    #[test]
    fn prop_reads_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let (schema, _) = record();
        let mut cursor = Cursor::new(bytes.clone());
        let _ = read_value(&mut cursor, &schema);
        let mut cursor = Cursor::new(bytes);
        let _ = read_dynamic(&mut cursor);
    }
}
