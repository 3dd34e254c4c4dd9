//! Benchmarks for the demo patch.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::{io, patch, EngineConfig};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_patch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/patch");

    for &size in BLOCK_SIZES {
        let config = EngineConfig::new(SAMPLE_RATE, size);

        let (mut engine, controls) = patch::demo(config.clone()).expect("demo patch builds");
        controls.gate.set(1.0);
        group.bench_with_input(BenchmarkId::new("demo_block", size), &size, |b, &size| {
            b.iter(|| {
                black_box(engine.render_block(size).expect("block fits"));
            })
        });

        // A stereo device buffer of 1024 frames, pumped in blocks of `size`
        let (mut engine, controls) = patch::demo(config).expect("demo patch builds");
        controls.gate.set(1.0);
        let mut device = vec![0.0f32; 2 * 1024];
        group.bench_with_input(BenchmarkId::new("demo_pump_1024", size), &size, |b, _| {
            b.iter(|| {
                io::fill_interleaved(&mut engine, &mut device, 2).expect("pump succeeds");
                black_box(&device);
            })
        });
    }

    group.finish();
}
