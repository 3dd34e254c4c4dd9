#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
Triangle Oscillator
===================

A phase accumulator in [0, 1) advanced by frequency / sample_rate each
sample. The duty value splits the cycle into a rising and a falling ramp:

     1 ┐      ╱╲
       │     ╱  ╲
       │    ╱    ╲
    -1 └───╱──────╲──→ phase
           0   d    1

    phase < d   output = phase / d * 2 - 1
    phase ≥ d   output = (1 - phase) / (1 - d) * 2 - 1

duty = 0.5 is the symmetric triangle; duty near 0 or 1 turns it into a
falling or rising saw. Duty is clamped to [0, 1]; neither branch divides by
zero because phase < 0 and phase ≥ 1 never happen.

Phase is kept in f64 so long-running oscillators do not drift audibly, and
wraps with a Euclidean remainder so negative frequencies (through-zero
modulation) still land in [0, 1).
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OscillatorState {
    pub phase: f64,
}

#[inline]
fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn triangle(
    state: &mut OscillatorState,
    ctx: &RenderCtx,
    frequency: &[f32],
    duty: &[f32],
    out: &mut [f32],
) {
    let n = ctx.sample_count;
    let inv_sample_rate = 1.0 / ctx.sample_rate;
    let mut phase = state.phase;

    for ((o, &f), &d) in out[..n].iter_mut().zip(&frequency[..n]).zip(&duty[..n]) {
        phase = wrap_phase(phase + f as f64 * inv_sample_rate);
        let d = d.clamp(0.0, 1.0) as f64;
        *o = if phase < d {
            phase / d * 2.0 - 1.0
        } else {
            (1.0 - phase) / (1.0 - d) * 2.0 - 1.0
        } as f32;
    }

    state.phase = phase;
}
