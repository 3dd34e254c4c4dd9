//! Level and N-ary mixing kernels.

/*
Mixing
======

    set        out[s] = value
    add        out[s] = in_0[s] + in_1[s] + ... + in_n[s]     (0 when n = 0)
    multiply   out[s] = in_0[s] * in_1[s] * ... * in_n[s]     (1 when n = 0)

`multiply` doubles as the VCA: an oscillator stream times an envelope
stream is an enveloped voice. The empty cases give the identity of each
operation so a node with no inputs is still well defined.

There is no gain staging here. Sums can exceed [-1, 1]; the stereo limiter
at the end of the graph deals with that.
*/

use crate::graph::node::RenderCtx;

/// Fill the first `sample_count` slots with `value`.
#[inline]
pub fn set(ctx: &RenderCtx, value: f32, out: &mut [f32]) {
    out[..ctx.sample_count].fill(value);
}

/// Elementwise sum of every input.
///
/// Inputs are any iterator of slices so the scheduler can pass its stream
/// lookups straight through without collecting them first.
pub fn add<I>(ctx: &RenderCtx, inputs: I, out: &mut [f32])
where
    I: IntoIterator,
    I::Item: AsRef<[f32]>,
{
    let out = &mut out[..ctx.sample_count];
    out.fill(0.0);
    for input in inputs {
        for (o, &x) in out.iter_mut().zip(&input.as_ref()[..ctx.sample_count]) {
            *o += x;
        }
    }
}

/// Elementwise product of every input.
pub fn multiply<I>(ctx: &RenderCtx, inputs: I, out: &mut [f32])
where
    I: IntoIterator,
    I::Item: AsRef<[f32]>,
{
    let out = &mut out[..ctx.sample_count];
    out.fill(1.0);
    for input in inputs {
        for (o, &x) in out.iter_mut().zip(&input.as_ref()[..ctx.sample_count]) {
            *o *= x;
        }
    }
}
