//! Graph plus a designated stereo output pair.

use crate::dsp::stereo::stereo_interleave;
use crate::error::GraphError;
use crate::graph::{BlockReport, Graph, RenderCtx, StreamId};

/// Renders interleaved stereo blocks from a graph.
///
/// The interleave buffer is sized once from the graph's `max_block_size`,
/// so `render_block` never allocates and can run inside a device callback.
#[derive(Debug)]
pub struct Engine {
    graph: Graph,
    left: StreamId,
    right: StreamId,
    interleaved: Vec<f32>,
    last_report: BlockReport,
}

impl Engine {
    pub fn new(graph: Graph, left: StreamId, right: StreamId) -> Result<Self, GraphError> {
        for id in [left, right] {
            if graph.stream(id).is_none() {
                return Err(GraphError::UnknownStream(id));
            }
        }
        let interleaved = vec![0.0; 2 * graph.config().max_block_size];

        Ok(Self {
            graph,
            left,
            right,
            interleaved,
            last_report: BlockReport::default(),
        })
    }

    /// Evaluate one block and return `2 * sample_count` interleaved samples.
    pub fn render_block(&mut self, sample_count: usize) -> Result<&[f32], GraphError> {
        self.render_block_with_report(sample_count)
            .map(|(block, _)| block)
    }

    pub fn render_block_with_report(
        &mut self,
        sample_count: usize,
    ) -> Result<(&[f32], BlockReport), GraphError> {
        self.last_report = self.graph.process(sample_count)?;

        let ctx = RenderCtx::new(self.graph.config().sample_rate, sample_count);
        stereo_interleave(
            &ctx,
            self.graph.stream_buffer(self.left),
            self.graph.stream_buffer(self.right),
            &mut self.interleaved,
        );
        Ok((&self.interleaved[..2 * sample_count], self.last_report))
    }

    pub fn last_report(&self) -> &BlockReport {
        &self.last_report
    }

    pub fn sample_rate(&self) -> f64 {
        self.graph.config().sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.graph.config().max_block_size
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn outputs(&self) -> (StreamId, StreamId) {
        (self.left, self.right)
    }
}
