use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// An `f32` stored as its bit pattern so it can be shared without a lock.
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Control value shared between a control thread and a parameter node.
///
/// The parameter node samples the value once at the start of every block
/// and fills its stream with it, so a change lands on the next block
/// boundary. Reads and writes are wait-free.
///
/// ```
/// use blockdsp::ParamHandle;
///
/// let cutoff = ParamHandle::new(800.0);
/// let ui_side = cutoff.clone();
/// ui_side.set(1_200.0);
/// assert_eq!(cutoff.get(), 1_200.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParamHandle(Arc<AtomicF32>);

impl ParamHandle {
    pub fn new(value: f32) -> Self {
        Self(Arc::new(AtomicF32::new(value)))
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.0.set(value);
    }
}
