use rand::SeedableRng;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::dsp::{
    AdsrParams, DelayReaderState, EnvelopeState, FilterState, LimiterState, OscillatorState,
    PinkNoiseState, Xoroshiro128Plus,
};
use crate::error::GraphError;
use crate::graph::delay::{DelayLine, DelayLineId};
use crate::graph::node::{Kernel, Node, NodeId, RenderCtx};
use crate::graph::param::ParamHandle;
use crate::graph::stream::{StreamId, StreamPool};

/// Summary of one evaluated block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockReport {
    pub sample_count: usize,
    /// Some limiter node saw a sample above full scale during this block.
    pub limiter_engaged: bool,
    /// Largest limiter divisor at the end of the block (1.0 with no limiter).
    pub max_divisor: f64,
}

impl BlockReport {
    fn new(sample_count: usize) -> Self {
        Self {
            sample_count,
            limiter_engaged: false,
            max_divisor: 1.0,
        }
    }
}

impl Default for BlockReport {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Signal graph evaluated in registration order.
///
/// Every builder method registers one node, allocates fresh output streams
/// for it and returns their ids. A node can only name streams that already
/// exist, so every input is produced earlier in the evaluation order, except
/// for delay lines which are the one sanctioned way to close a loop.
///
/// ```
/// use blockdsp::{EngineConfig, Graph};
///
/// let mut graph = Graph::new(EngineConfig::default()).unwrap();
/// let freq = graph.constant(441.0).unwrap();
/// let duty = graph.constant(0.5).unwrap();
/// let osc = graph.triangle(freq, duty).unwrap();
///
/// graph.process(128).unwrap();
/// assert_eq!(graph.stream(osc).unwrap().len(), 128);
/// ```
#[derive(Debug)]
pub struct Graph {
    config: EngineConfig,
    nodes: Vec<Node>,
    streams: StreamPool,
    /// Producing node of every stream, indexed by stream.
    producers: Vec<NodeId>,
    delay_lines: Vec<DelayLine>,
    noise_seed: Xoroshiro128Plus,
    last_sample_count: usize,
}

impl Graph {
    pub fn new(config: EngineConfig) -> Result<Self, GraphError> {
        config.validate()?;
        debug!(
            sample_rate = config.sample_rate,
            max_block_size = config.max_block_size,
            max_nodes = config.max_nodes,
            "creating graph"
        );

        Ok(Self {
            nodes: Vec::new(),
            streams: StreamPool::new(config.max_block_size),
            producers: Vec::new(),
            delay_lines: Vec::new(),
            noise_seed: Xoroshiro128Plus::seed_from_u64(config.seed),
            last_sample_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// The node that writes `stream`.
    pub fn producer(&self, stream: StreamId) -> Option<&Node> {
        self.producers
            .get(stream.index())
            .and_then(|id| self.nodes.get(id.0))
    }

    pub fn delay(&self, id: DelayLineId) -> Option<&DelayLine> {
        self.delay_lines.get(id.index())
    }

    /// Valid samples of `id` from the most recent block.
    pub fn stream(&self, id: StreamId) -> Option<&[f32]> {
        self.streams
            .contains(id)
            .then(|| &self.streams.get(id)[..self.last_sample_count])
    }

    /// Full-capacity buffer, for callers that pick their own length.
    pub(crate) fn stream_buffer(&self, id: StreamId) -> &[f32] {
        self.streams.get(id)
    }

    /// Tear down every node, stream and delay line.
    ///
    /// Ids handed out before the call are invalid afterwards. The noise seed
    /// is rewound, so rebuilding the same patch reproduces the same audio.
    pub fn clear(&mut self) {
        debug!(nodes = self.nodes.len(), "clearing graph");
        self.nodes.clear();
        self.streams.clear();
        self.producers.clear();
        self.delay_lines.clear();
        self.noise_seed = Xoroshiro128Plus::seed_from_u64(self.config.seed);
        self.last_sample_count = 0;
    }

    /// Evaluate every node once, in registration order.
    pub fn process(&mut self, sample_count: usize) -> Result<BlockReport, GraphError> {
        if sample_count > self.config.max_block_size {
            return Err(GraphError::BlockTooLarge {
                requested: sample_count,
                max: self.config.max_block_size,
            });
        }

        let ctx = RenderCtx::new(self.config.sample_rate, sample_count);
        for line in &mut self.delay_lines {
            line.begin_block();
        }

        let mut report = BlockReport::new(sample_count);
        for (index, node) in self.nodes.iter_mut().enumerate() {
            let Some(activity) = node.process(&ctx, &mut self.streams, &mut self.delay_lines)
            else {
                continue;
            };

            let engaged = activity.state.hit_limiter;
            if engaged && !activity.was_limiting {
                warn!(
                    node = index,
                    divisor = activity.state.divisor,
                    "stereo limiter engaged"
                );
            } else if !engaged && activity.was_limiting {
                debug!(node = index, "stereo limiter released");
            }
            report.limiter_engaged |= engaged;
            report.max_divisor = report.max_divisor.max(activity.state.divisor);
        }

        self.last_sample_count = sample_count;
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    fn register(&mut self, kernel: Kernel) -> Result<NodeId, GraphError> {
        if self.nodes.len() >= self.config.max_nodes {
            return Err(GraphError::TooManyNodes {
                max: self.config.max_nodes,
            });
        }

        let id = NodeId(self.nodes.len());
        let outputs: Vec<StreamId> = (0..kernel.output_count())
            .map(|_| {
                let stream = self.streams.allocate();
                self.producers.push(id);
                stream
            })
            .collect();

        debug!(node = id.0, kind = kernel.name(), "registered node");
        self.nodes.push(Node::new(kernel, outputs));
        Ok(id)
    }

    fn register_single(&mut self, kernel: Kernel) -> Result<StreamId, GraphError> {
        let id = self.register(kernel)?;
        Ok(self.nodes[id.0].outputs()[0])
    }

    fn check_stream(&self, id: StreamId) -> Result<StreamId, GraphError> {
        if self.streams.contains(id) {
            Ok(id)
        } else {
            Err(GraphError::UnknownStream(id))
        }
    }

    fn check_line(&self, id: DelayLineId) -> Result<&DelayLine, GraphError> {
        self.delay_lines
            .get(id.index())
            .ok_or(GraphError::UnknownDelayLine(id))
    }

    /// Hand the master generator's current state to a new noise node and
    /// jump the master once the node is registered.
    fn register_noise(
        &mut self,
        kernel: impl FnOnce(Xoroshiro128Plus) -> Kernel,
    ) -> Result<StreamId, GraphError> {
        let stream = self.register_single(kernel(self.noise_seed.clone()))?;
        self.noise_seed.jump();
        Ok(stream)
    }

    /// Stream holding `value` in every slot.
    pub fn constant(&mut self, value: f32) -> Result<StreamId, GraphError> {
        if !value.is_finite() {
            return Err(GraphError::InvalidParameter {
                name: "value",
                value: value as f64,
            });
        }
        self.register_single(Kernel::Constant { value })
    }

    /// Stream refilled from `handle` at the start of every block.
    pub fn parameter(&mut self, handle: &ParamHandle) -> Result<StreamId, GraphError> {
        self.register_single(Kernel::Parameter {
            source: handle.clone(),
        })
    }

    pub fn add(&mut self, inputs: &[StreamId]) -> Result<StreamId, GraphError> {
        let inputs = inputs
            .iter()
            .map(|&id| self.check_stream(id))
            .collect::<Result<Vec<_>, _>>()?;
        self.register_single(Kernel::Add { inputs })
    }

    pub fn multiply(&mut self, inputs: &[StreamId]) -> Result<StreamId, GraphError> {
        let inputs = inputs
            .iter()
            .map(|&id| self.check_stream(id))
            .collect::<Result<Vec<_>, _>>()?;
        self.register_single(Kernel::Multiply { inputs })
    }

    pub fn lowpass(&mut self, input: StreamId, cutoff: StreamId) -> Result<StreamId, GraphError> {
        self.register_single(Kernel::Lowpass {
            input: self.check_stream(input)?,
            cutoff: self.check_stream(cutoff)?,
            state: FilterState::default(),
        })
    }

    pub fn highpass(&mut self, input: StreamId, cutoff: StreamId) -> Result<StreamId, GraphError> {
        self.register_single(Kernel::Highpass {
            input: self.check_stream(input)?,
            cutoff: self.check_stream(cutoff)?,
            state: FilterState::default(),
        })
    }

    pub fn triangle(&mut self, frequency: StreamId, duty: StreamId) -> Result<StreamId, GraphError> {
        self.register_single(Kernel::Triangle {
            frequency: self.check_stream(frequency)?,
            duty: self.check_stream(duty)?,
            state: OscillatorState::default(),
        })
    }

    pub fn adsr(&mut self, gate: StreamId, params: AdsrParams) -> Result<StreamId, GraphError> {
        let gate = self.check_stream(gate)?;
        for (name, value) in [
            ("attack", params.attack),
            ("decay", params.decay),
            ("release", params.release),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GraphError::InvalidParameter { name, value });
            }
        }
        if !(0.0..=1.0).contains(&params.sustain) {
            return Err(GraphError::InvalidParameter {
                name: "sustain",
                value: params.sustain,
            });
        }

        self.register_single(Kernel::Adsr {
            gate,
            params,
            state: EnvelopeState::default(),
        })
    }

    /// Returns the limited `(left, right)` pair.
    pub fn stereo_limiter(
        &mut self,
        left: StreamId,
        right: StreamId,
    ) -> Result<(StreamId, StreamId), GraphError> {
        let id = self.register(Kernel::StereoLimiter {
            left: self.check_stream(left)?,
            right: self.check_stream(right)?,
            state: LimiterState::default(),
        })?;
        let outputs = self.nodes[id.0].outputs();
        Ok((outputs[0], outputs[1]))
    }

    pub fn white_noise(&mut self) -> Result<StreamId, GraphError> {
        self.register_noise(|rng| Kernel::WhiteNoise { rng })
    }

    pub fn pink_noise(&mut self) -> Result<StreamId, GraphError> {
        self.register_noise(|rng| Kernel::PinkNoise {
            rng,
            state: PinkNoiseState::default(),
        })
    }

    /// Allocate a zeroed circular buffer of `buffer_size` samples.
    pub fn delay_line(&mut self, buffer_size: usize) -> Result<DelayLineId, GraphError> {
        if buffer_size == 0 {
            return Err(GraphError::InvalidParameter {
                name: "buffer_size",
                value: 0.0,
            });
        }
        let id = DelayLineId(self.delay_lines.len());
        self.delay_lines.push(DelayLine::new(buffer_size));
        debug!(line = id.0, buffer_size, "allocated delay line");
        Ok(id)
    }

    /// Register the single writer of `line`.
    pub fn delay_writer(&mut self, line: DelayLineId, input: StreamId) -> Result<NodeId, GraphError> {
        let input = self.check_stream(input)?;
        if self.check_line(line)?.has_writer {
            return Err(GraphError::DelayLineHasWriter(line));
        }

        let id = self.register(Kernel::DelayWriter { input, line })?;
        self.delay_lines[line.index()].has_writer = true;
        Ok(id)
    }

    /// Register a tap on `line`, `delay_time` seconds behind the writer,
    /// clamped to `[min_delay_samples, max_delay_samples]`.
    pub fn delay_reader(
        &mut self,
        line: DelayLineId,
        delay_time: StreamId,
        min_delay_samples: usize,
        max_delay_samples: usize,
    ) -> Result<StreamId, GraphError> {
        let delay_time = self.check_stream(delay_time)?;
        let buffer_size = self.check_line(line)?.len();
        if min_delay_samples > max_delay_samples || max_delay_samples >= buffer_size {
            return Err(GraphError::InvalidDelayRange {
                min: min_delay_samples,
                max: max_delay_samples,
                buffer_size,
            });
        }

        self.register_single(Kernel::DelayReader {
            line,
            delay_time,
            state: DelayReaderState {
                read_index: 0,
                min_delay_samples,
                max_delay_samples,
            },
        })
    }
}
