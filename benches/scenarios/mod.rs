//! Whole-graph benchmarks.
//!
//! These run the scheduler end to end, including stream lookups and the
//! per-node dispatch, rather than a single kernel.

mod graph;
mod patch;

pub use graph::bench_graph;
pub use patch::bench_patch;
