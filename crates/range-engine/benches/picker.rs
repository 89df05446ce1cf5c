use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use range_engine::{matrix_in, resolve, validate, Constraints, DateTimeRange, LocalDateTime, ZonedInstant};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.bench_function("exact", |b| {
        b.iter(|| resolve(black_box(LocalDateTime::new(2025, 0, 15, 9, 30)), "America/New_York"))
    });
    group.bench_function("gap", |b| {
        b.iter(|| resolve(black_box(LocalDateTime::new(2025, 2, 9, 2, 30)), "America/New_York"))
    });
    group.bench_function("overlap", |b| {
        b.iter(|| resolve(black_box(LocalDateTime::new(2025, 10, 2, 1, 30)), "America/New_York"))
    });
    group.finish();
}

fn bench_matrix(c: &mut Criterion) {
    c.bench_function("matrix_in/new_york", |b| {
        b.iter(|| matrix_in(black_box(2025), black_box(2), "America/New_York"))
    });
}

fn bench_validate(c: &mut Criterion) {
    let constraints = Constraints {
        min: Some(0),
        max: Some(i64::MAX),
        blackout: (0..365).map(|d| d * 86_400_000).collect(),
        min_duration_ms: Some(1),
        max_duration_ms: None,
    };
    let range = DateTimeRange::new(
        ZonedInstant::new(1_000, "UTC"),
        ZonedInstant::new(86_399_000, "UTC"),
    );
    c.bench_function("validate/365_blackouts", |b| {
        b.iter(|| validate(black_box(&range), Some(&constraints)))
    });
}

criterion_group!(benches, bench_resolve, bench_matrix, bench_validate);
criterion_main!(benches);
