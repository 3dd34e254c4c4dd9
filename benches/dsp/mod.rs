//! Benchmarks for single kernels.

mod delay;
mod envelope;
mod filter;
mod limiter;
mod mix;
mod noise;
mod oscillator;

pub use delay::bench_delay;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use limiter::bench_limiter;
pub use mix::bench_mix;
pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
