//! Benchmarks for wide graphs.
//!
//! Many independent voices summed into one bus, to see how the scheduler
//! scales with node count.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blockdsp::dsp::AdsrParams;
use blockdsp::{EngineConfig, Graph, GraphError, StreamId};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// `voices` × (triangle → lowpass → envelope), summed and limited.
fn build(voices: usize, block_size: usize) -> Result<Graph, GraphError> {
    let config = EngineConfig {
        max_nodes: 1024,
        ..EngineConfig::new(SAMPLE_RATE, block_size)
    };
    let mut g = Graph::new(config)?;

    let duty = g.constant(0.5)?;
    let cutoff = g.constant(2_000.0)?;
    let gate = g.constant(1.0)?;
    let mut bus: Vec<StreamId> = Vec::with_capacity(voices);
    for v in 0..voices {
        let pitch = g.constant(110.0 * (1.0 + v as f32 * 0.25))?;
        let osc = g.triangle(pitch, duty)?;
        let filtered = g.lowpass(osc, cutoff)?;
        let env = g.adsr(gate, AdsrParams::default())?;
        bus.push(g.multiply(&[filtered, env])?);
    }
    let sum = g.add(&bus)?;
    let level = g.constant(1.0 / voices as f32)?;
    let out = g.multiply(&[sum, level])?;
    g.stereo_limiter(out, out)?;
    Ok(g)
}

pub fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/graph");

    for &size in BLOCK_SIZES {
        for voices in [4, 16, 64] {
            let mut graph = build(voices, size).expect("graph builds");
            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, &size| {
                    b.iter(|| black_box(graph.process(size).expect("block fits")))
                },
            );
        }
    }

    group.finish();
}
