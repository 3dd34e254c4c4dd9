use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
One-Pole Filters
================

A single state variable (`last_value`) chases the input:

    last_value += alpha * (input - last_value)

    lowpass  output = last_value            (the smoothed signal)
    highpass output = input - last_value    (whatever the smoother missed)

Because highpass is defined as the remainder, lowpass(x) + highpass(x) == x
for any input and cutoff. The two share one recurrence; only the output tap
differs.

Coefficient
-----------

Cutoff is a stream, so alpha is recomputed every sample:

    wc    = 2π · clamp(f / Sr, 0, 0.5)
    y     = 1 - cos(wc)
    alpha = -y + sqrt(y · (y + 2))

f = 0 gives alpha = 0 (output frozen). At Nyquist y = 2 and alpha tops out
at sqrt(8) - 2 ≈ 0.83. In between the -3 dB point tracks f.

Denormals
---------

As the state decays towards zero it would eventually enter the subnormal
range, where arithmetic is dramatically slower on most CPUs. Adding and then
subtracting 1e-20 in f64 rounds anything below about 1e-36 to exactly zero,
which covers the whole f32 subnormal range without touching normal values.
*/

const DENORMAL_GUARD: f64 = 1e-20;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    pub last_value: f32,
}

#[inline]
pub fn filter_coefficient(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let wc = 2.0 * PI * (cutoff_hz / sample_rate).clamp(0.0, 0.5);
    let y = 1.0 - wc.cos();
    -y + (y * (y + 2.0)).sqrt()
}

#[inline]
fn advance(state: &mut FilterState, input: f32, cutoff_hz: f32, sample_rate: f32) {
    let alpha = filter_coefficient(cutoff_hz, sample_rate);
    let last = state.last_value + alpha * (input - state.last_value);
    state.last_value = (last as f64 + DENORMAL_GUARD - DENORMAL_GUARD) as f32;
}

pub fn lowpass(
    state: &mut FilterState,
    ctx: &RenderCtx,
    input: &[f32],
    cutoff: &[f32],
    out: &mut [f32],
) {
    let n = ctx.sample_count;
    let sample_rate = ctx.sample_rate as f32;
    for ((o, &x), &fc) in out[..n].iter_mut().zip(&input[..n]).zip(&cutoff[..n]) {
        advance(state, x, fc, sample_rate);
        *o = state.last_value;
    }
}

pub fn highpass(
    state: &mut FilterState,
    ctx: &RenderCtx,
    input: &[f32],
    cutoff: &[f32],
    out: &mut [f32],
) {
    let n = ctx.sample_count;
    let sample_rate = ctx.sample_rate as f32;
    for ((o, &x), &fc) in out[..n].iter_mut().zip(&input[..n]).zip(&cutoff[..n]) {
        advance(state, x, fc, sample_rate);
        *o = x - state.last_value;
    }
}
