use std::mem;

/// Handle to a stream owned by a [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub(crate) usize);

impl StreamId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity sample buffers, allocated once at graph construction.
///
/// Every buffer holds `capacity` samples for its whole life. Per block only
/// the first `sample_count` are meaningful; the scheduler never resizes or
/// reallocates a buffer once handed out.
#[derive(Debug)]
pub struct StreamPool {
    buffers: Vec<Vec<f32>>,
    capacity: usize,
}

impl StreamPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: Vec::new(),
            capacity,
        }
    }

    pub fn allocate(&mut self) -> StreamId {
        self.buffers.push(vec![0.0; self.capacity]);
        StreamId(self.buffers.len() - 1)
    }

    pub fn contains(&self, id: StreamId) -> bool {
        id.0 < self.buffers.len()
    }

    /// Full-capacity view of a stream.
    #[inline]
    pub fn get(&self, id: StreamId) -> &[f32] {
        &self.buffers[id.0]
    }

    /// Move a buffer out so it can be written while other streams are read.
    /// Swaps in an empty `Vec`, which does not allocate.
    #[inline]
    pub(crate) fn take(&mut self, id: StreamId) -> Vec<f32> {
        mem::take(&mut self.buffers[id.0])
    }

    #[inline]
    pub(crate) fn restore(&mut self, id: StreamId, buffer: Vec<f32>) {
        debug_assert!(self.buffers[id.0].is_empty());
        self.buffers[id.0] = buffer;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}
