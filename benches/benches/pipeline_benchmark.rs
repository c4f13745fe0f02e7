//! Analysis pipeline benchmarks.
//!
//! Run with: `cargo bench --package ratelens-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ratelens_bench::{CURRENCIES, synthetic_csv, synthetic_records};
use ratelens_lib::{Period, RecordFilter, aggregate, from_long_format, read_upload_bytes, resample};
use std::hint::black_box;

/// Data set sizes: (name, currencies, days).
const SIZES: [(&str, usize, u64); 3] = [("1y-2", 2, 365), ("5y-4", 4, 1826), ("20y-8", 8, 7305)];

fn pivot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pivot");
    for (name, currencies, days) in SIZES {
        let records = synthetic_records(currencies, days);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &records, |b, records| {
            b.iter(|| from_long_format(black_box(records.clone()), &RecordFilter::new()));
        });
    }
    group.finish();
}

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    for (name, currencies, days) in SIZES {
        let table = from_long_format(synthetic_records(currencies, days), &RecordFilter::new());
        group.throughput(Throughput::Elements(table.cell_count() as u64));
        for period in [Period::Weekly, Period::Monthly] {
            group.bench_with_input(BenchmarkId::new(period.as_str(), name), &table, |b, table| {
                b.iter(|| resample(black_box(table), period));
            });
        }
    }
    group.finish();
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for (name, currencies, days) in SIZES {
        let table = from_long_format(synthetic_records(currencies, days), &RecordFilter::new());
        let ids = &CURRENCIES[..currencies];
        group.bench_with_input(BenchmarkId::from_parameter(name), &table, |b, table| {
            b.iter(|| aggregate(black_box(table), ids));
        });
    }
    group.finish();
}

fn upload_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("read_upload");
    for (name, currencies, days) in SIZES {
        let csv = synthetic_csv(&synthetic_records(currencies, days));
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &csv, |b, csv| {
            b.to_async(&runtime)
                .iter(|| async { read_upload_bytes(black_box(csv.as_bytes())).await.unwrap() });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    pivot_benchmark,
    resample_benchmark,
    aggregate_benchmark,
    upload_benchmark
);
criterion_main!(benches);
