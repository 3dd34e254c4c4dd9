#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
ADSR Envelope Implementation
============================

A linear ADSR driven by a gate STREAM rather than note events, so it can be
patched like any other signal. Gate ≥ 0.5 is "held", gate < 0.5 is
"released".

Vocabulary
----------

  value       The envelope's current output (0.0 to 1.0).

  stage       Attack, Decay, Sustain or Release. There is no separate Idle
              stage: Release at value 0 is the resting state, and a fresh
              envelope starts there.

  delta       Per-sample change of `value` in the current stage, derived
              from the stage time and the sample rate.


The State Machine
-----------------

                  gate ≥ 0.5
    ┌─────────┐ ────────────→ ┌────────┐  value = 1  ┌───────┐
    │ Release │               │ Attack │ ──────────→ │ Decay │
    └─────────┘ ←──────────── └────────┘             └───────┘
         ↑        gate < 0.5                             │ value = S
         │                                               ↓
         │         gate < 0.5                       ┌─────────┐
         └───────────────────────────────────────── │ Sustain │
                                                    └─────────┘

Gate transitions are checked before the stage update on every sample, so a
gate edge takes effect on the sample it arrives.


The Math
--------

    attack_delta  =  1 / max(1, attack · Sr)
    decay_delta   = -(1 - S) / max(1, decay · Sr)
    release_delta = -value_at_gate_off / max(1, release · Sr)

The max(1, ...) keeps zero-length stages at a single-sample jump instead of
a division by zero. Release is computed from the level at the moment the
gate drops, so releasing half-way through an attack ramps down from there
rather than jumping to 1 or to S first.

Release is clamped at zero, and the level is checked against [0, 1] on
every sample. Escaping that range means the recurrence is broken, so it
panics instead of handing wrong audio downstream.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,  // Ramping up to 1.0
    Decay,   // Ramping down to sustain
    Sustain, // Holding while the gate is high
    Release, // Ramping to 0, or resting at 0
}

/// Stage times in seconds plus the sustain level.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl AdsrParams {
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeState {
    pub stage: EnvelopeStage,
    pub value: f64,
    pub release_delta: f64,
}

impl Default for EnvelopeState {
    fn default() -> Self {
        Self {
            stage: EnvelopeStage::Release,
            value: 0.0,
            release_delta: 0.0,
        }
    }
}

pub fn adsr(
    state: &mut EnvelopeState,
    params: &AdsrParams,
    ctx: &RenderCtx,
    gate: &[f32],
    out: &mut [f32],
) {
    let n = ctx.sample_count;
    let sr = ctx.sample_rate;
    let sustain = params.sustain.clamp(0.0, 1.0);

    let attack_delta = 1.0 / (params.attack * sr).max(1.0);
    let decay_delta = -(1.0 - sustain) / (params.decay * sr).max(1.0);

    let EnvelopeState {
        mut stage,
        mut value,
        mut release_delta,
    } = *state;

    for (o, &g) in out[..n].iter_mut().zip(&gate[..n]) {
        if g >= 0.5 {
            if stage == EnvelopeStage::Release {
                stage = EnvelopeStage::Attack;
            }
        } else if stage != EnvelopeStage::Release {
            stage = EnvelopeStage::Release;
            release_delta = -value / (params.release * sr).max(1.0);
        }

        match stage {
            EnvelopeStage::Attack => {
                value += attack_delta;
                if value >= 1.0 {
                    value = 1.0;
                    stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                value += decay_delta;
                if value <= sustain {
                    value = sustain;
                    stage = EnvelopeStage::Sustain;
                }
            }
            EnvelopeStage::Sustain => {}
            EnvelopeStage::Release => {
                if value > 0.0 {
                    value = (value + release_delta).max(0.0);
                }
            }
        }

        assert!(
            (0.0..=1.0).contains(&value),
            "envelope value {value} escaped [0, 1] in {stage:?}"
        );
        *o = value as f32;
    }

    *state = EnvelopeState {
        stage,
        value,
        release_delta,
    };
}
