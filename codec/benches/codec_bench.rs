//! Criterion benchmarks for the value codecs.
//!
//! Run with: cargo bench -p wirepack-codec

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use codec::{read_dynamic, read_value, write_dynamic, write_value, Value};
use cursor::Cursor;
use schema::{Property, Schema};

fn entity_schema() -> Schema {
    Schema::object([
        Property::new("id", Schema::var_uint()),
        Property::new("name", Schema::string()),
        Property::new("flags", Schema::bits([1, 1, 6])),
        Property::new(
            "position",
            Schema::tuple([Schema::float32(), Schema::float32(), Schema::float32()]),
        ),
        Property::new("tags", Schema::array(Schema::string256())),
    ])
}

fn entity(id: u64) -> Value {
    [
        ("id", Value::from(id)),
        ("name", Value::from("entity")),
        (
            "flags",
            Value::Array(vec![Value::Int(1), Value::Int(0), Value::Int(42)]),
        ),
        (
            "position",
            Value::Array(vec![
                Value::Float(1.5),
                Value::Float(-2.25),
                Value::Float(0.0),
            ]),
        ),
        (
            "tags",
            Value::Array(vec![Value::from("alpha"), Value::from("beta")]),
        ),
    ]
    .into_iter()
    .collect()
}

fn bench_typed(c: &mut Criterion) {
    let schema = entity_schema();
    let value = entity(123_456);
    let mut group = c.benchmark_group("typed");
    group.throughput(Throughput::Elements(1));

    group.bench_function("write", |b| {
        let mut cursor = Cursor::new(vec![0u8; 256]);
        b.iter(|| {
            cursor.reset();
            write_value(&mut cursor, &schema, black_box(&value)).unwrap();
        });
    });

    let mut cursor = Cursor::new(vec![0u8; 256]);
    write_value(&mut cursor, &schema, &value).unwrap();
    let bytes = cursor.written().to_vec();
    group.bench_function("read", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(bytes.as_slice()));
            read_value(&mut cursor, &schema).unwrap()
        });
    });

    group.finish();
}

fn bench_dynamic(c: &mut Criterion) {
    let value = Value::Array((0..64).map(entity).collect());
    let mut group = c.benchmark_group("dynamic");
    group.throughput(Throughput::Elements(64));

    group.bench_function("write", |b| {
        let mut cursor = Cursor::new(vec![0u8; 16 * 1024]);
        b.iter(|| {
            cursor.reset();
            write_dynamic(&mut cursor, black_box(&value)).unwrap();
        });
    });

    let mut cursor = Cursor::new(vec![0u8; 16 * 1024]);
    write_dynamic(&mut cursor, &value).unwrap();
    let bytes = cursor.written().to_vec();
    group.bench_function("read", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(bytes.as_slice()));
            read_dynamic(&mut cursor).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_typed, bench_dynamic);
criterion_main!(benches);
