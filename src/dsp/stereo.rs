//! Stereo output stage: peak limiter and interleave.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
Adaptive Divide-Down Limiter
============================

Both channels are divided by one shared `divisor` (≥ 1) so the stereo image
is preserved.

    amplitude = max(|left|, |right|)
    if amplitude > 1:  divisor = max(divisor, amplitude)     (instant attack)
    out = in / divisor
    divisor = max(1, divisor · 0.99)                          (release)

Attack is instant: the sample that overshoots is already divided by its own
amplitude, so it lands on exactly ±1. Release is exponential at 0.99 per
sample (about 10 ms to fall back 63% of the way at 44.1 kHz), which lets the
gain recover smoothly instead of snapping back.

`hit_limiter` records whether any sample in the block exceeded 1. It is
informational: the scheduler reports and logs it, audio keeps flowing.
*/

const RELEASE: f64 = 0.99;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterState {
    pub divisor: f64,
    /// Recomputed on every call; never read on entry.
    pub hit_limiter: bool,
}

impl Default for LimiterState {
    fn default() -> Self {
        Self {
            divisor: 1.0,
            hit_limiter: false,
        }
    }
}

pub fn stereo_limiter(
    state: &mut LimiterState,
    ctx: &RenderCtx,
    left: &[f32],
    right: &[f32],
    out_left: &mut [f32],
    out_right: &mut [f32],
) {
    let n = ctx.sample_count;
    let mut divisor = state.divisor;
    let mut hit_limiter = false;

    let inputs = left[..n].iter().zip(&right[..n]);
    let outputs = out_left[..n].iter_mut().zip(out_right[..n].iter_mut());
    for ((&l, &r), (ol, or)) in inputs.zip(outputs) {
        let amplitude = l.abs().max(r.abs());
        if amplitude > 1.0 {
            divisor = divisor.max(amplitude as f64);
            hit_limiter = true;
        }
        assert!(divisor >= 1.0, "limiter divisor {divisor} fell below 1");
        *ol = (l as f64 / divisor) as f32;
        *or = (r as f64 / divisor) as f32;
        divisor = (divisor * RELEASE).max(1.0);
    }

    state.divisor = divisor;
    state.hit_limiter = hit_limiter;
}

/// `out[2s] = left[s]`, `out[2s + 1] = right[s]`; `out` needs 2 × sample_count slots.
pub fn stereo_interleave(ctx: &RenderCtx, left: &[f32], right: &[f32], out: &mut [f32]) {
    let n = ctx.sample_count;
    for ((frame, &l), &r) in out[..2 * n]
        .chunks_exact_mut(2)
        .zip(&left[..n])
        .zip(&right[..n])
    {
        frame[0] = l;
        frame[1] = r;
    }
}
