//! Benchmarks for the surveillance pipeline
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wildwatch::pipeline::{filter, Aggregates, Dashboard, FilterCriteria};
use wildwatch::surveillance::{
    Dataset, GeneratorConfig, Region, SamplingProfile, Severity, Syndrome,
};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for size in [500, 5_000, 50_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("uniform_{}", size), |b| {
            b.iter(|| Dataset::generate(black_box(size), 42, GeneratorConfig::default()).unwrap())
        });
    }

    let field = GeneratorConfig {
        profile: SamplingProfile::Field,
        ..Default::default()
    };
    group.throughput(Throughput::Elements(5_000));
    group.bench_function("field_5000", |b| {
        b.iter(|| Dataset::generate(black_box(5_000), 42, field.clone()).unwrap())
    });

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let dataset = Dataset::generate(50_000, 42, GeneratorConfig::default()).unwrap();
    group.throughput(Throughput::Elements(dataset.len() as u64));

    group.bench_function("unrestricted", |b| {
        let criteria = FilterCriteria::default();
        b.iter(|| filter(black_box(dataset.records()), &criteria).unwrap())
    });

    group.bench_function("region_severity_syndrome", |b| {
        let criteria = FilterCriteria::new()
            .region(Region::Amboseli)
            .region(Region::Samburu)
            .severity(Severity::High)
            .severity(Severity::Critical)
            .syndrome(Syndrome::Respiratory);
        b.iter(|| filter(black_box(dataset.records()), &criteria).unwrap())
    });

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let dataset = Dataset::generate(50_000, 42, GeneratorConfig::default()).unwrap();
    group.throughput(Throughput::Elements(dataset.len() as u64));

    group.bench_function("aggregates", |b| {
        b.iter(|| Aggregates::compute(black_box(dataset.records())))
    });

    group.bench_function("dashboard", |b| {
        let criteria = FilterCriteria::default();
        b.iter(|| Dashboard::build(black_box(&dataset), &criteria).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_filter, bench_aggregate);
criterion_main!(benches);
