//! Benchmarks for the ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::dsp::envelope::{adsr, AdsrParams, EnvelopeState};
use blockdsp::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let params = AdsrParams::new(0.01, 0.1, 0.7, 0.3);

    for &size in BLOCK_SIZES {
        let ctx = RenderCtx::new(SAMPLE_RATE, size);
        let held = vec![1.0f32; size];
        // Gate toggling every 32 samples, so every stage gets visited
        let toggling: Vec<f32> = (0..size)
            .map(|i| if (i / 32) % 2 == 0 { 1.0 } else { 0.0 })
            .collect();
        let mut out = vec![0.0f32; size];

        let mut state = EnvelopeState::default();
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| adsr(&mut state, &params, &ctx, black_box(&held), &mut out))
        });

        let mut state = EnvelopeState::default();
        group.bench_with_input(BenchmarkId::new("toggling", size), &size, |b, _| {
            b.iter(|| adsr(&mut state, &params, &ctx, black_box(&toggling), &mut out))
        });
    }

    group.finish();
}
