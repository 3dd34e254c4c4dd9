//! Benchmarks for the stereo limiter and interleave.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::dsp::stereo::{stereo_interleave, stereo_limiter, LimiterState};
use blockdsp::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/limiter");

    for &size in BLOCK_SIZES {
        let ctx = RenderCtx::new(SAMPLE_RATE, size);
        // Peaks at 1.5, so the limiter is busy for part of every cycle
        let left: Vec<f32> = (0..size).map(|i| 1.5 * (i as f32 * 0.05).sin()).collect();
        let right: Vec<f32> = (0..size).map(|i| 1.5 * (i as f32 * 0.07).cos()).collect();
        let mut out_l = vec![0.0f32; size];
        let mut out_r = vec![0.0f32; size];
        let mut interleaved = vec![0.0f32; 2 * size];

        let mut state = LimiterState::default();
        group.bench_with_input(BenchmarkId::new("stereo_limiter", size), &size, |b, _| {
            b.iter(|| {
                stereo_limiter(
                    &mut state,
                    &ctx,
                    black_box(&left),
                    black_box(&right),
                    &mut out_l,
                    &mut out_r,
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("interleave", size), &size, |b, _| {
            b.iter(|| stereo_interleave(&ctx, black_box(&left), black_box(&right), &mut interleaved))
        });
    }

    group.finish();
}
