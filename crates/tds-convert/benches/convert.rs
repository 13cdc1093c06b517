//! Benchmarks for the type conversion engine.

#![allow(clippy::unwrap_used, missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tds_convert::{TypeId, TypeInfo, convert};

/// Benchmark character-to-scalar parsing, the hottest row-decode path.
fn bench_char_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_parsing");
    let varchar = TypeInfo::new(TypeId::VarChar);

    group.bench_function("to_int4", |b| {
        let dst = TypeInfo::new(TypeId::Int4);
        b.iter(|| convert(&varchar, black_box(b"2147483647"), &dst).unwrap())
    });

    group.bench_function("to_money", |b| {
        let dst = TypeInfo::new(TypeId::Money);
        b.iter(|| convert(&varchar, black_box(b"-922337203685477.5807"), &dst).unwrap())
    });

    group.bench_function("to_numeric_38", |b| {
        let dst = TypeInfo::numeric(38, 10);
        b.iter(|| {
            convert(
                &varchar,
                black_box(b"1234567890123456789012345678.0123456789"),
                &dst,
            )
            .unwrap()
        })
    });

    group.finish();
}

/// Benchmark numeric rescaling, the multiprecision-heavy path.
fn bench_numeric_rescale(c: &mut Criterion) {
    let src = TypeInfo::numeric(38, 10);
    let tds_convert::ConvResult::Numeric(n) = convert(
        &TypeInfo::new(TypeId::VarChar),
        b"1234567890123456789012345678.0123456789",
        &src,
    )
    .unwrap() else {
        unreachable!()
    };
    let wire = n.to_wire();

    c.bench_function("numeric_rescale", |b| {
        let dst = TypeInfo::numeric(38, 4);
        b.iter(|| convert(black_box(&src), black_box(&wire), &dst).unwrap())
    });
}

criterion_group!(benches, bench_char_parsing, bench_numeric_rescale);
criterion_main!(benches);
