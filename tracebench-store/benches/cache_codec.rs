//! Cache codec micro-benchmark: key/value encoding sits on the hot path of
//! every cached read.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tracebench_core::{Field, TimestampedValue};
use tracebench_store::cache::{decode_value, encode_key, encode_value};

fn bench_codec(c: &mut Criterion) {
    let key: Vec<Field> = (0..4)
        .map(|i| Field::new(format!("f{i}"), format!("value-{i}")))
        .collect();
    let value = TimestampedValue::new(1_700_000_000, "payload,with,separators");
    let raw = encode_value(&value);

    c.bench_function("encode_key/4-fields", |b| {
        b.iter(|| encode_key(black_box(&key)))
    });
    c.bench_function("encode_value", |b| b.iter(|| encode_value(black_box(&value))));
    c.bench_function("decode_value", |b| b.iter(|| decode_value(black_box(&raw))));
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
