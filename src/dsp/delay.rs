#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
Circular Delay
==============

Writing and reading are separate kernels so one buffer can feed several
taps, and so a reader can sit before its writer in the graph to form a
feedback loop.

    writer:  buffer[write_index] = in[s]
             write_index = (write_index + 1) mod size

    reader:  d     = clamp(round(delay_time[s] · Sr), min, max)
             out[s] = buffer[(read_index - d + size) mod size]
             read_index += 1

The reader's cursor is advanced only inside the call. It is NOT written back
to the state record: every call starts from the `read_index` it is given,
and whoever drives the reader is expected to supply the cursor (the graph
scheduler loads the delay line's block cursor before each call).
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelayWriterState {
    pub write_index: usize,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelayReaderState {
    pub read_index: usize,
    pub min_delay_samples: usize,
    pub max_delay_samples: usize,
}

pub fn delay_writer(
    state: &mut DelayWriterState,
    ctx: &RenderCtx,
    input: &[f32],
    buffer: &mut [f32],
) {
    let size = buffer.len();
    let mut write_index = state.write_index;
    for &x in &input[..ctx.sample_count] {
        buffer[write_index] = x;
        write_index = (write_index + 1) % size;
    }
    state.write_index = write_index;
}

#[inline]
pub fn delay_in_samples(delay_time: f32, sample_rate: f64, min: usize, max: usize) -> usize {
    let samples = (delay_time as f64 * sample_rate + 0.5).floor();
    // float -> int casts saturate, NaN becomes 0
    (samples.max(0.0) as usize).clamp(min, max)
}

pub fn delay_reader(
    state: &DelayReaderState,
    ctx: &RenderCtx,
    buffer: &[f32],
    delay_time: &[f32],
    out: &mut [f32],
) {
    let n = ctx.sample_count;
    let size = buffer.len();
    let mut read_index = state.read_index;

    for (o, &t) in out[..n].iter_mut().zip(&delay_time[..n]) {
        let delay = delay_in_samples(
            t,
            ctx.sample_rate,
            state.min_delay_samples,
            state.max_delay_samples,
        );
        let index = (read_index % size + size - delay % size) % size;
        *o = buffer[index];
        read_index += 1;
    }
}
