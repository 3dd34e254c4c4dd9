//! Output pump helpers: carving device buffers into blocks.
//!
//! A device callback asks for some number of frames in whatever channel
//! layout the device uses. The engine renders at most `max_block_size`
//! stereo frames at a time, so the pump loops, rendering
//! `min(max_block_size, remaining)` frames per pass and mapping each stereo
//! frame onto the device channels.

#[cfg(feature = "rtrb")]
pub mod tap;

use crate::engine::Engine;
use crate::error::GraphError;
use crate::graph::BlockReport;

/// Frames to render next, or `None` when the device wants nothing.
#[inline]
pub fn block_size_for(available_frames: usize, max_block_size: usize) -> Option<usize> {
    (available_frames > 0).then(|| available_frames.min(max_block_size))
}

/// Fill an interleaved device buffer of `channels` channels.
pub fn fill_interleaved(
    engine: &mut Engine,
    device_buffer: &mut [f32],
    channels: usize,
) -> Result<(), GraphError> {
    fill_interleaved_with(engine, device_buffer, channels, |_, _| {})
}

/// Like [`fill_interleaved`], calling `on_block` with each rendered stereo
/// block and its report before it is copied out.
///
/// Channel 0 gets left and channel 1 right; a mono device gets `(l + r) / 2`
/// and any channels past the second are silenced.
pub fn fill_interleaved_with<F>(
    engine: &mut Engine,
    device_buffer: &mut [f32],
    channels: usize,
    mut on_block: F,
) -> Result<(), GraphError>
where
    F: FnMut(&[f32], &BlockReport),
{
    if channels == 0 {
        return Err(GraphError::InvalidConfig("device has no output channels"));
    }

    let max_block_size = engine.max_block_size();
    let mut frames = device_buffer.chunks_exact_mut(channels);

    while let Some(block_size) = block_size_for(frames.len(), max_block_size) {
        let (stereo, report) = engine.render_block_with_report(block_size)?;
        on_block(stereo, &report);

        for (frame, lr) in frames.by_ref().take(block_size).zip(stereo.chunks_exact(2)) {
            write_frame(frame, lr[0], lr[1]);
        }
    }

    // a trailing partial frame cannot be rendered
    frames.into_remainder().fill(0.0);
    Ok(())
}

#[inline]
fn write_frame(frame: &mut [f32], left: f32, right: f32) {
    match frame {
        [mono] => *mono = (left + right) * 0.5,
        [l, r, rest @ ..] => {
            *l = left;
            *r = right;
            rest.fill(0.0);
        }
        [] => {}
    }
}
