pub mod config;
pub mod dsp; // Per-block kernels and their state records
pub mod engine;
pub mod error;
pub mod graph; // Streams, nodes and the registration-order scheduler
pub mod io;
pub mod patch;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::GraphError;
pub use graph::{BlockReport, Graph, ParamHandle, StreamId};

pub const SAMPLE_RATE: f64 = 44_100.0;
pub const MAX_BLOCK_SIZE: usize = 512;
pub const MAX_NODES: usize = 512;
