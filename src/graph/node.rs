use crate::dsp::{
    delay, envelope, filter, mix, noise, oscillator, stereo, AdsrParams, DelayReaderState,
    EnvelopeState, FilterState, LimiterState, OscillatorState, PinkNoiseState, Xoroshiro128Plus,
};
use crate::graph::delay::{DelayLine, DelayLineId};
use crate::graph::param::ParamHandle;
use crate::graph::stream::{StreamId, StreamPool};

/// What a kernel needs to know about the block being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCtx {
    pub sample_rate: f64,
    /// Valid samples in every stream for this block.
    pub sample_count: usize,
}

impl RenderCtx {
    pub fn new(sample_rate: f64, sample_count: usize) -> Self {
        Self {
            sample_rate,
            sample_count,
        }
    }
}

/// Index of a node in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A kernel bound to its inputs and its persistent state.
#[derive(Debug)]
pub enum Kernel {
    Constant {
        value: f32,
    },
    Parameter {
        source: ParamHandle,
    },
    Add {
        inputs: Vec<StreamId>,
    },
    Multiply {
        inputs: Vec<StreamId>,
    },
    Lowpass {
        input: StreamId,
        cutoff: StreamId,
        state: FilterState,
    },
    Highpass {
        input: StreamId,
        cutoff: StreamId,
        state: FilterState,
    },
    Triangle {
        frequency: StreamId,
        duty: StreamId,
        state: OscillatorState,
    },
    Adsr {
        gate: StreamId,
        params: AdsrParams,
        state: EnvelopeState,
    },
    StereoLimiter {
        left: StreamId,
        right: StreamId,
        state: LimiterState,
    },
    DelayWriter {
        input: StreamId,
        line: DelayLineId,
    },
    DelayReader {
        line: DelayLineId,
        delay_time: StreamId,
        state: DelayReaderState,
    },
    WhiteNoise {
        rng: Xoroshiro128Plus,
    },
    PinkNoise {
        rng: Xoroshiro128Plus,
        state: PinkNoiseState,
    },
}

impl Kernel {
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Constant { .. } => "constant",
            Kernel::Parameter { .. } => "parameter",
            Kernel::Add { .. } => "add",
            Kernel::Multiply { .. } => "multiply",
            Kernel::Lowpass { .. } => "lowpass",
            Kernel::Highpass { .. } => "highpass",
            Kernel::Triangle { .. } => "triangle",
            Kernel::Adsr { .. } => "adsr",
            Kernel::StereoLimiter { .. } => "stereo_limiter",
            Kernel::DelayWriter { .. } => "delay_writer",
            Kernel::DelayReader { .. } => "delay_reader",
            Kernel::WhiteNoise { .. } => "white_noise",
            Kernel::PinkNoise { .. } => "pink_noise",
        }
    }

    /// Number of streams this kernel writes.
    pub fn output_count(&self) -> usize {
        match self {
            Kernel::StereoLimiter { .. } => 2,
            Kernel::DelayWriter { .. } => 0,
            _ => 1,
        }
    }

    fn run(
        &mut self,
        ctx: &RenderCtx,
        streams: &StreamPool,
        lines: &mut [DelayLine],
        out: &mut [f32],
        out_right: &mut [f32],
    ) -> Option<LimiterActivity> {
        match self {
            Kernel::Constant { value } => mix::set(ctx, *value, out),
            Kernel::Parameter { source } => mix::set(ctx, source.get(), out),
            Kernel::Add { inputs } => mix::add(ctx, inputs.iter().map(|&id| streams.get(id)), out),
            Kernel::Multiply { inputs } => {
                mix::multiply(ctx, inputs.iter().map(|&id| streams.get(id)), out)
            }
            Kernel::Lowpass {
                input,
                cutoff,
                state,
            } => filter::lowpass(state, ctx, streams.get(*input), streams.get(*cutoff), out),
            Kernel::Highpass {
                input,
                cutoff,
                state,
            } => filter::highpass(state, ctx, streams.get(*input), streams.get(*cutoff), out),
            Kernel::Triangle {
                frequency,
                duty,
                state,
            } => oscillator::triangle(state, ctx, streams.get(*frequency), streams.get(*duty), out),
            Kernel::Adsr {
                gate,
                params,
                state,
            } => envelope::adsr(state, params, ctx, streams.get(*gate), out),
            Kernel::StereoLimiter { left, right, state } => {
                let was_limiting = state.hit_limiter;
                stereo::stereo_limiter(
                    state,
                    ctx,
                    streams.get(*left),
                    streams.get(*right),
                    out,
                    out_right,
                );
                return Some(LimiterActivity {
                    was_limiting,
                    state: *state,
                });
            }
            Kernel::DelayWriter { input, line } => {
                let line = &mut lines[line.index()];
                delay::delay_writer(&mut line.writer, ctx, streams.get(*input), &mut line.buffer);
            }
            Kernel::DelayReader {
                line,
                delay_time,
                state,
            } => {
                let line = &lines[line.index()];
                state.read_index = line.block_cursor;
                delay::delay_reader(state, ctx, &line.buffer, streams.get(*delay_time), out);
            }
            Kernel::WhiteNoise { rng } => noise::white_noise(rng, ctx, out),
            Kernel::PinkNoise { rng, state } => noise::pink_noise(state, rng, ctx, out),
        }
        None
    }
}

/// Limiter state after a block, with the previous block's engagement flag
/// for edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LimiterActivity {
    pub was_limiting: bool,
    pub state: LimiterState,
}

/// One entry in the evaluation list.
#[derive(Debug)]
pub struct Node {
    kernel: Kernel,
    outputs: Vec<StreamId>,
}

impl Node {
    pub(crate) fn new(kernel: Kernel, outputs: Vec<StreamId>) -> Self {
        debug_assert_eq!(kernel.output_count(), outputs.len());
        Self { kernel, outputs }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn name(&self) -> &'static str {
        self.kernel.name()
    }

    pub fn outputs(&self) -> &[StreamId] {
        &self.outputs
    }

    /// Run the kernel once for the current block.
    ///
    /// Output buffers are moved out of the pool for the duration of the call
    /// so inputs can be borrowed from the same pool. Nodes never read their
    /// own outputs, so the empty placeholders are never observed.
    pub(crate) fn process(
        &mut self,
        ctx: &RenderCtx,
        streams: &mut StreamPool,
        lines: &mut [DelayLine],
    ) -> Option<LimiterActivity> {
        let first = self.outputs.first().copied();
        let second = self.outputs.get(1).copied();

        let mut out = first.map(|id| streams.take(id)).unwrap_or_default();
        let mut out_right = second.map(|id| streams.take(id)).unwrap_or_default();

        let activity = self
            .kernel
            .run(ctx, streams, lines, &mut out, &mut out_right);

        if let Some(id) = first {
            streams.restore(id, out);
        }
        if let Some(id) = second {
            streams.restore(id, out_right);
        }
        activity
    }
}
