//! Benchmarks for the triangle oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::dsp::oscillator::{triangle, OscillatorState};
use blockdsp::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let ctx = RenderCtx::new(SAMPLE_RATE, size);
        let frequency = vec![440.0f32; size];
        let symmetric = vec![0.5f32; size];
        // Duty modulated across the block (PWM-style)
        let modulated: Vec<f32> = (0..size)
            .map(|i| 0.1 + 0.8 * i as f32 / size as f32)
            .collect();
        let mut out = vec![0.0f32; size];

        let mut state = OscillatorState::default();
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                triangle(&mut state, &ctx, black_box(&frequency), black_box(&symmetric), &mut out)
            })
        });

        let mut state = OscillatorState::default();
        group.bench_with_input(BenchmarkId::new("triangle_pwm", size), &size, |b, _| {
            b.iter(|| {
                triangle(&mut state, &ctx, black_box(&frequency), black_box(&modulated), &mut out)
            })
        });
    }

    group.finish();
}
