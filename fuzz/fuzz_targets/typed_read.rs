#![no_main]

use codec::{read_value_with_limits, DecodeLimits};
use cursor::Cursor;
use libfuzzer_sys::fuzz_target;
use schema::{AtomKind, Primitive, Property, Schema};

fn schemas() -> Vec<Schema> {
    vec![
        Schema::object([
            Property::new("id", Schema::var_uint()),
            Property::new("name", Schema::string()),
            Property::new("flags", Schema::bits([1, 3, 12])),
            Property::new("mask", Schema::bit_vec()),
        ]),
        Schema::array(Schema::nullable(Schema::decimal())),
        Schema::tuple_partial([Schema::small_var_int(), Schema::string256()]),
        Schema::object_partial([Property::new("kind", Schema::enumeration([
            Primitive::from("a"),
            Primitive::from("b"),
        ]))]),
        Schema::record(Schema::union([Schema::float64(), Schema::var_int()])),
        Schema::enum_typed(AtomKind::Int16, [Primitive::Int(-1), Primitive::Int(7)]),
        Schema::fixed_array(Schema::unknown(), 3),
    ]
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let schemas = schemas();
    let schema = &schemas[usize::from(selector) % schemas.len()];
    let mut cursor = Cursor::new(payload);
    let _ = read_value_with_limits(&mut cursor, schema, &DecodeLimits::for_testing());
});
