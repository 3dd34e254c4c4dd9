//! Benchmarks for the one-pole filter pair.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::dsp::filter::{highpass, lowpass, FilterState};
use blockdsp::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let ctx = RenderCtx::new(SAMPLE_RATE, size);
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let fixed = vec![1_000.0f32; size];
        // Cutoff swept across the block, so the coefficient changes every sample
        let swept: Vec<f32> = (0..size)
            .map(|i| 200.0 + 8_000.0 * i as f32 / size as f32)
            .collect();
        let mut out = vec![0.0f32; size];

        let mut state = FilterState::default();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| lowpass(&mut state, &ctx, black_box(&input), black_box(&fixed), &mut out))
        });

        let mut state = FilterState::default();
        group.bench_with_input(BenchmarkId::new("lowpass_swept", size), &size, |b, _| {
            b.iter(|| lowpass(&mut state, &ctx, black_box(&input), black_box(&swept), &mut out))
        });

        let mut state = FilterState::default();
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| highpass(&mut state, &ctx, black_box(&input), black_box(&fixed), &mut out))
        });
    }

    group.finish();
}
