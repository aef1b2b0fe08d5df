//! Criterion benchmarks for LotSizeAggregator

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lotsize::services::LotSizeAggregator;
use lotsize::types::{LotField, SizeRow, Specification};
use std::hint::black_box;

/// Build a lot of `rows` rows spread over `sizes` distinct sizes
fn build_lot(rows: usize, sizes: usize) -> LotSizeAggregator {
    let prior: Vec<SizeRow> = (0..rows)
        .map(|i| SizeRow {
            size: format!("{}", i % sizes),
            set: format!("{}", i % 7 + 1),
            gross_wt: format!("{}.{}", i % 50 + 1, i % 1000),
            net_wt: format!("{}.{}", i % 40 + 1, i % 100),
            ..SizeRow::default()
        })
        .collect();
    let options = (0..sizes).map(|i| i.to_string()).collect();
    LotSizeAggregator::seeded(prior, Specification::from("STONE"), options)
}

fn bench_group_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregator");

    for rows in [10usize, 1_000, 100_000] {
        let lot = build_lot(rows, 32);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("group_by_size", rows), &lot, |b, lot| {
            b.iter(|| black_box(lot).group_by_size());
        });
        group.bench_with_input(BenchmarkId::new("compute_totals", rows), &lot, |b, lot| {
            b.iter(|| black_box(lot).compute_totals());
        });
    }

    group.finish();
}

fn bench_save(c: &mut Criterion) {
    let lot = build_lot(1_000, 32);

    let mut group = c.benchmark_group("aggregator");
    group.throughput(Throughput::Elements(lot.len() as u64));
    group.bench_function("save", |b| {
        b.iter(|| black_box(&lot).save());
    });
    group.finish();
}

fn bench_update_field(c: &mut Criterion) {
    let mut lot = build_lot(1_000, 1_000);

    let mut group = c.benchmark_group("aggregator");
    group.bench_function("update_field (weight)", |b| {
        b.iter(|| lot.update_field(black_box(500), LotField::GrossWt, "12.345"));
    });
    group.bench_function("update_field (size, duplicate scan)", |b| {
        b.iter(|| lot.update_field(black_box(500), LotField::Size, "999"));
    });
    group.finish();
}

criterion_group!(benches, bench_group_by_size, bench_save, bench_update_field);
criterion_main!(benches);
