use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spiceql_server::{interpolate_times, resolve_ets, Literal, Param};

fn bench_scalar_window(c: &mut Criterion) {
    c.bench_function("resolve_scalar_window_10k", |b| {
        b.iter(|| {
            resolve_ets(
                None,
                Some(Param::One(black_box(0.0))),
                Some(Param::One(black_box(10_000.0))),
                Some(Param::One(black_box(1.0))),
            )
        })
    });
}

fn bench_many_windows(c: &mut Criterion) {
    let starts: Vec<f64> = (0..100).map(|i| i as f64 * 1000.0).collect();
    let stops: Vec<f64> = starts.iter().map(|s| s + 100.0).collect();
    let steps = vec![0.5; starts.len()];

    c.bench_function("interpolate_100_windows", |b| {
        b.iter(|| interpolate_times(black_box(&starts), black_box(&stops), black_box(&steps)))
    });
}

fn bench_literal_decode(c: &mut Criterion) {
    let text = format!(
        "[{}]",
        (0..1000)
            .map(|i| format!("{}.25", i))
            .collect::<Vec<_>>()
            .join(", ")
    );

    c.bench_function("parse_literal_1000_floats", |b| {
        b.iter(|| Literal::parse(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_scalar_window,
    bench_many_windows,
    bench_literal_decode
);
criterion_main!(benches);
