use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use convert_kit::{convert, parse, Value};

fn bench_numeric_parse(c: &mut Criterion) {
    c.bench_function("parse_i64", |b| {
        b.iter(|| parse::parse_i64(black_box("9223372036854775807")))
    });

    c.bench_function("parse_f64_grouped", |b| {
        b.iter(|| parse::parse_f64(black_box("1,234,567.891")))
    });

    c.bench_function("parse_decimal", |b| {
        b.iter(|| parse::parse_decimal(black_box("9527.5600")))
    });
}

fn bench_date_parse(c: &mut Criterion) {
    c.bench_function("parse_date_time_iso", |b| {
        b.iter(|| parse::parse_date_time(black_box("2006-01-02T15:04:05")))
    });

    c.bench_function("parse_date_time_offset_rfc3339", |b| {
        b.iter(|| parse::parse_date_time_offset(black_box("2006-01-02T15:04:05+02:00")))
    });
}

fn bench_convert(c: &mut Criterion) {
    let text = Value::from("9527");
    let number = Value::from(9527);

    c.bench_function("convert_to_i32_from_text", |b| {
        b.iter(|| convert::to_i32(black_box(&text)))
    });

    c.bench_function("convert_to_i32_identity", |b| {
        b.iter(|| convert::to_i32(black_box(&number)))
    });
}

criterion_group!(benches, bench_numeric_parse, bench_date_parse, bench_convert);
criterion_main!(benches);
