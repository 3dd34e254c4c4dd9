//! Benchmarks for set, add and multiply.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::dsp::mix::{add, multiply, set};
use blockdsp::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let ctx = RenderCtx::new(SAMPLE_RATE, size);
        let inputs: Vec<Vec<f32>> = (0..8)
            .map(|k| (0..size).map(|i| ((i + k) as f32 * 0.01).sin()).collect())
            .collect();
        let mut out = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("set", size), &size, |b, _| {
            b.iter(|| set(&ctx, black_box(0.5), &mut out))
        });

        group.bench_with_input(BenchmarkId::new("add_2", size), &size, |b, _| {
            b.iter(|| add(&ctx, black_box(&inputs[..2]), &mut out))
        });

        group.bench_with_input(BenchmarkId::new("add_8", size), &size, |b, _| {
            b.iter(|| add(&ctx, black_box(&inputs), &mut out))
        });

        group.bench_with_input(BenchmarkId::new("multiply_2", size), &size, |b, _| {
            b.iter(|| multiply(&ctx, black_box(&inputs[..2]), &mut out))
        });
    }

    group.finish();
}
