//! Performance benchmarks for directed-inputs.
//!
//! Covers the hot paths of a store once it is built:
//! - Case-insensitive lookups with and without coercion
//! - Layered decoding of a single input
//! - Freeze/thaw cycles as the input set grows
//! - Resolving a handful of sources

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use directed_inputs::core::InputSettings;
use directed_inputs::prelude::*;
use directed_inputs::sources::EnvSource;
use serde_json::{Map, Value, json};

fn bench_store(size: usize) -> InputStore {
    let mut inputs = Map::new();
    for i in 0..size {
        inputs.insert(format!("INPUT_{i}"), json!(i.to_string()));
    }
    inputs.insert("Region".to_string(), json!("eu-west-1"));
    inputs.insert("payload".to_string(), json!("eyJuYW1lIjoidGVzdCJ9"));
    InputStore::new(inputs)
}

/// Benchmark plain and coerced lookups
fn benchmark_get(c: &mut Criterion) {
    let store = bench_store(100);

    let mut group = c.benchmark_group("get");
    group.bench_function("raw", |b| {
        b.iter(|| {
            let value = store.get(black_box("REGION"), GetOptions::new()).unwrap();
            black_box(value);
        });
    });
    group.bench_function("integer", |b| {
        b.iter(|| {
            let value = store.get_integer(black_box("input_42")).unwrap();
            black_box(value);
        });
    });
    group.bench_function("missing_with_default", |b| {
        b.iter(|| {
            let value = store
                .get(black_box("absent"), GetOptions::new().with_default(8080))
                .unwrap();
            black_box(value);
        });
    });
    group.finish();
}

/// Benchmark decoding Base64 wrapped JSON
fn benchmark_decode(c: &mut Criterion) {
    let store = bench_store(10);

    let mut group = c.benchmark_group("decode_input");
    for decode_type in [DecodeType::Base64, DecodeType::JsonBase64, DecodeType::YamlBase64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{decode_type:?}")),
            &decode_type,
            |b, &decode_type| {
                b.iter(|| {
                    let value = store
                        .decode_input(black_box("payload"), DecodeOptions::new(decode_type))
                        .unwrap();
                    black_box(value);
                });
            },
        );
    }
    group.finish();
}

/// Benchmark a full freeze/thaw cycle
fn benchmark_freeze_thaw(c: &mut Criterion) {
    let mut group = c.benchmark_group("freeze_thaw");

    for size in [10, 100, 1000] {
        let mut store = bench_store(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                store.freeze();
                black_box(store.thaw().len());
            });
        });
    }
    group.finish();
}

/// Benchmark thawing into a repopulated input set, which deep-merges
fn benchmark_thaw_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("thaw_merge");
    group.bench_function("merge_100", |b| {
        b.iter_batched(
            || {
                let mut store = bench_store(100);
                store.freeze();
                store.extend((0..100).map(|i| (format!("input_{i}"), Value::from(i))));
                store
            },
            |mut store| {
                black_box(store.thaw().len());
            },
            criterion::BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// Benchmark building a store from environment and init sources
fn benchmark_resolve(c: &mut Criterion) {
    let vars: Vec<(String, String)> = (0..200)
        .map(|i| (format!("VAR_{i}"), format!("value_{i}")))
        .collect();

    let mut group = c.benchmark_group("resolve");
    group.sample_size(50);
    group.bench_function("env_and_init", |b| {
        b.iter(|| {
            let store = InputStore::builder()
                .with_settings(InputSettings::default())
                .with_env_source(EnvSource::from_vars(vars.clone()))
                .with_input("region", "eu-west-1")
                .build()
                .unwrap();
            black_box(store.inputs().len());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_get,
    benchmark_decode,
    benchmark_freeze_thaw,
    benchmark_thaw_merge,
    benchmark_resolve
);

criterion_main!(benches);
