use crate::dsp::delay::DelayWriterState;

/// Handle to a circular buffer owned by a [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelayLineId(pub(crate) usize);

impl DelayLineId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Circular buffer shared by one writer node and any number of readers.
///
/// `block_cursor` is the write position at the start of the current block,
/// i.e. where sample 0 of this block is (or will be) stored. Readers load it
/// as their `read_index`, which lines their output up with the writer's
/// input whichever side of the writer they were registered on.
#[derive(Debug)]
pub struct DelayLine {
    pub(crate) buffer: Vec<f32>,
    pub(crate) writer: DelayWriterState,
    pub(crate) block_cursor: usize,
    pub(crate) has_writer: bool,
}

impl DelayLine {
    pub(crate) fn new(buffer_size: usize) -> Self {
        Self {
            buffer: vec![0.0; buffer_size],
            writer: DelayWriterState::default(),
            block_cursor: 0,
            has_writer: false,
        }
    }

    #[inline]
    pub(crate) fn begin_block(&mut self) {
        self.block_cursor = self.writer.write_index;
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write_index(&self) -> usize {
        self.writer.write_index
    }

    pub fn block_cursor(&self) -> usize {
        self.block_cursor
    }

    pub fn has_writer(&self) -> bool {
        self.has_writer
    }
}
