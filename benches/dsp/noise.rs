//! Benchmarks for white and pink noise.

use criterion::{BenchmarkId, Criterion};
use rand::SeedableRng;
use blockdsp::dsp::noise::{pink_noise, white_noise, PinkNoiseState};
use blockdsp::dsp::random::Xoroshiro128Plus;
use blockdsp::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        let ctx = RenderCtx::new(SAMPLE_RATE, size);
        let mut out = vec![0.0f32; size];

        let mut rng = Xoroshiro128Plus::seed_from_u64(1);
        group.bench_with_input(BenchmarkId::new("white", size), &size, |b, _| {
            b.iter(|| white_noise(&mut rng, &ctx, &mut out))
        });

        let mut rng = Xoroshiro128Plus::seed_from_u64(2);
        let mut state = PinkNoiseState::default();
        group.bench_with_input(BenchmarkId::new("pink", size), &size, |b, _| {
            b.iter(|| pink_noise(&mut state, &mut rng, &ctx, &mut out))
        });
    }

    group.finish();
}
