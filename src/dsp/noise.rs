//! White and pink noise.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::random::Xoroshiro128Plus;
use crate::graph::node::RenderCtx;

/*
Pink Noise (Paul Kellet's refined method)
=========================================

Six one-pole lowpass filters with staggered poles run on the same white
input. Their sum approximates a -3 dB/octave slope to within ±0.05 dB above
about 9 Hz; a direct white term and a one-sample-delayed white term (`b6`)
fill in the top octave.

    b0 =  0.99886 b0 + w · 0.0555179
    b1 =  0.99332 b1 + w · 0.0750759
    b2 =  0.96900 b2 + w · 0.1538520
    b3 =  0.86650 b3 + w · 0.3104856
    b4 =  0.55000 b4 + w · 0.5329522
    b5 = -0.7616  b5 - w · 0.0168980
    out = b0 + b1 + b2 + b3 + b4 + b5 + b6 + w · 0.5362
    b6 = w · 0.115926

The taps are f64 but the coefficients are the single-precision constants of
the published recurrence, widened. Output is not normalised: with a
uniform [-1, 1) source its RMS sits around 1.7, so scale it down before
mixing.
*/

#[inline]
fn white_sample(rng: &mut Xoroshiro128Plus) -> f32 {
    (rng.next_f64() * 2.0 - 1.0) as f32
}

pub fn white_noise(rng: &mut Xoroshiro128Plus, ctx: &RenderCtx, out: &mut [f32]) {
    for o in out[..ctx.sample_count].iter_mut() {
        *o = white_sample(rng);
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinkNoiseState {
    pub b: [f64; 7],
}

#[inline]
fn coeff(c: f32) -> f64 {
    c as f64
}

pub fn pink_noise(
    state: &mut PinkNoiseState,
    rng: &mut Xoroshiro128Plus,
    ctx: &RenderCtx,
    out: &mut [f32],
) {
    let [mut b0, mut b1, mut b2, mut b3, mut b4, mut b5, mut b6] = state.b;

    for o in out[..ctx.sample_count].iter_mut() {
        let white = white_sample(rng) as f64;
        b0 = coeff(0.99886) * b0 + white * coeff(0.0555179);
        b1 = coeff(0.99332) * b1 + white * coeff(0.0750759);
        b2 = coeff(0.96900) * b2 + white * coeff(0.1538520);
        b3 = coeff(0.86650) * b3 + white * coeff(0.3104856);
        b4 = coeff(0.55000) * b4 + white * coeff(0.5329522);
        b5 = coeff(-0.7616) * b5 - white * coeff(0.0168980);
        *o = (b0 + b1 + b2 + b3 + b4 + b5 + b6 + white * 0.5362) as f32;
        b6 = white * coeff(0.115926);
    }

    state.b = [b0, b1, b2, b3, b4, b5, b6];
}
