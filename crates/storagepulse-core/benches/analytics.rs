//! Benchmarks for the analytics computations

use std::time::Duration;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storagepulse::alerting::AlertEvaluator;
use storagepulse::analytics::{aggregate, cost_breakdown, ForecastGenerator, HeatmapSynthesizer};
use storagepulse::jitter::RandomJitter;
use storagepulse::registry::ProviderRegistry;
use storagepulse::{AnalyticsEngine, Config};

fn benchmark_aggregate(c: &mut Criterion) {
    let registry = ProviderRegistry::seeded();

    c.bench_function("aggregate_seeded", |b| {
        b.iter(|| black_box(aggregate(registry.list(), registry.totals())));
    });

    c.bench_function("cost_breakdown_seeded", |b| {
        b.iter(|| black_box(cost_breakdown(registry.list())));
    });
}

fn benchmark_forecast(c: &mut Criterion) {
    let registry = ProviderRegistry::seeded();
    let snapshot = aggregate(registry.list(), registry.totals());
    let generator = ForecastGenerator::default();
    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let mut jitter = RandomJitter::seeded(7);

    c.bench_function("forecast_36_months", |b| {
        b.iter(|| black_box(generator.forecast(&snapshot, 36, start, &mut jitter)));
    });
}

fn benchmark_heatmap(c: &mut Criterion) {
    let registry = ProviderRegistry::seeded();
    let synthesizer = HeatmapSynthesizer::default();
    let mut jitter = RandomJitter::seeded(7);

    c.bench_function("heatmap_seeded", |b| {
        b.iter(|| black_box(synthesizer.heatmap(registry.list(), &mut jitter)));
    });
}

fn benchmark_alerts(c: &mut Criterion) {
    let registry = ProviderRegistry::seeded();
    let snapshot = aggregate(registry.list(), registry.totals());
    let evaluator = AlertEvaluator::default();

    c.bench_function("evaluate_alerts_seeded", |b| {
        b.iter(|| black_box(evaluator.evaluate(registry.list(), &snapshot)));
    });
}

fn benchmark_engine(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut config = Config::default();
    config.engine.simulated_latency = Duration::ZERO;
    config.engine.seed = Some(7);
    let engine = AnalyticsEngine::new(ProviderRegistry::seeded(), &config).unwrap();

    c.bench_function("engine_heatmap", |b| {
        b.to_async(&rt).iter(|| async { black_box(engine.heatmap().await) });
    });
}

criterion_group!(
    benches,
    benchmark_aggregate,
    benchmark_forecast,
    benchmark_heatmap,
    benchmark_alerts,
    benchmark_engine
);
criterion_main!(benches);
