//! Per-block DSP kernels.
//!
//! Every kernel is a free function over slices: it takes a `RenderCtx`
//! (sample rate and the block's `sample_count`), its input streams, its
//! output streams and, if it has memory, a `&mut` state record. Kernels never
//! allocate and write exactly `sample_count` samples to each output. State
//! records are plain structs owned by the graph node that drives them.

/// Circular delay write and read taps.
pub mod delay;
/// Gate-driven ADSR envelope.
pub mod envelope;
/// One-pole lowpass/highpass pair.
pub mod filter;
/// Level set and N-ary add/multiply.
pub mod mix;
/// White and pink noise.
pub mod noise;
/// Triangle oscillator with variable duty.
pub mod oscillator;
/// xoroshiro128+ generator used by the noise kernels.
pub mod random;
/// Stereo limiter and interleave.
pub mod stereo;

pub use delay::{delay_reader, delay_writer, DelayReaderState, DelayWriterState};
pub use envelope::{adsr, AdsrParams, EnvelopeStage, EnvelopeState};
pub use filter::{highpass, lowpass, FilterState};
pub use mix::{add, multiply, set};
pub use noise::{pink_noise, white_noise, PinkNoiseState};
pub use oscillator::{triangle, OscillatorState};
pub use random::Xoroshiro128Plus;
pub use stereo::{stereo_interleave, stereo_limiter, LimiterState};
