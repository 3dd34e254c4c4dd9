//! Benchmarks for circular delay write and read.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::dsp::delay::{delay_reader, delay_writer, DelayReaderState, DelayWriterState};
use blockdsp::graph::RenderCtx;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");
    let buffer_size = SAMPLE_RATE as usize;

    for &size in BLOCK_SIZES {
        let ctx = RenderCtx::new(SAMPLE_RATE, size);
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.01).sin()).collect();
        let fixed_time = vec![0.25f32; size];
        // Modulated tap, chorus-style
        let swept_time: Vec<f32> = (0..size)
            .map(|i| 0.02 + 0.005 * (i as f32 * 0.02).sin())
            .collect();
        let mut buffer = vec![0.0f32; buffer_size];
        let mut out = vec![0.0f32; size];

        let mut writer = DelayWriterState::default();
        group.bench_with_input(BenchmarkId::new("write", size), &size, |b, _| {
            b.iter(|| delay_writer(&mut writer, &ctx, black_box(&input), &mut buffer))
        });

        let reader = DelayReaderState {
            read_index: writer.write_index,
            min_delay_samples: 0,
            max_delay_samples: buffer_size - 1,
        };
        group.bench_with_input(BenchmarkId::new("read", size), &size, |b, _| {
            b.iter(|| delay_reader(&reader, &ctx, black_box(&buffer), black_box(&fixed_time), &mut out))
        });

        group.bench_with_input(BenchmarkId::new("read_swept", size), &size, |b, _| {
            b.iter(|| delay_reader(&reader, &ctx, black_box(&buffer), black_box(&swept_time), &mut out))
        });
    }

    group.finish();
}
