//! Ready-made patches.

use crate::config::EngineConfig;
use crate::dsp::AdsrParams;
use crate::engine::Engine;
use crate::error::GraphError;
use crate::graph::{Graph, ParamHandle};

/// Control handles for [`demo`]. Clone freely; every clone drives the same
/// parameter node.
#[derive(Debug, Clone)]
pub struct DemoControls {
    /// ≥ 0.5 holds the envelope open.
    pub gate: ParamHandle,
    /// Oscillator frequency in Hz.
    pub pitch: ParamHandle,
    /// Lowpass cutoff in Hz.
    pub cutoff: ParamHandle,
    /// Triangle duty in [0, 1]; 0.5 is symmetric.
    pub duty: ParamHandle,
}

impl Default for DemoControls {
    fn default() -> Self {
        Self {
            gate: ParamHandle::new(0.0),
            pitch: ParamHandle::new(110.0),
            cutoff: ParamHandle::new(1_800.0),
            duty: ParamHandle::new(0.3),
        }
    }
}

const ECHO_SECONDS: f32 = 0.375;
const ECHO_FEEDBACK: f32 = 0.45;
const BED_LEVEL: f32 = 0.03;
const AIR_LEVEL: f32 = 0.02;
const AIR_CUTOFF_HZ: f32 = 6_000.0;
const DC_CUTOFF_HZ: f32 = 20.0;

/*
Demo Patch
==========

    pitch, duty ──► triangle ─┐
    pink ──► × bed level ─────┴─► + ──► lowpass(cutoff) ──► × adsr(gate) ──► voice

    echo line (1 s):
        echo = reader(0.375 s)            (registered before the writer)
        writer ◄── voice + echo × 0.45

    left  = highpass(voice + echo, 20 Hz)
    right = highpass(voice + echo + highpass(white, 6 kHz) × air × adsr, 20 Hz)

    (left, right) ──► stereo limiter ──► engine outputs

The echo reader sits before its writer, so the loop is closed through the
delay buffer and the minimum echo delay is one block.
*/

/// Build the demo patch.
pub fn demo(config: EngineConfig) -> Result<(Engine, DemoControls), GraphError> {
    let controls = DemoControls::default();
    let max_block_size = config.max_block_size;
    let echo_buffer = config.sample_rate.ceil() as usize;
    let mut g = Graph::new(config)?;

    // voice
    let pitch = g.parameter(&controls.pitch)?;
    let duty = g.parameter(&controls.duty)?;
    let osc = g.triangle(pitch, duty)?;

    let pink = g.pink_noise()?;
    let bed_level = g.constant(BED_LEVEL)?;
    let bed = g.multiply(&[pink, bed_level])?;

    let source = g.add(&[osc, bed])?;
    let cutoff = g.parameter(&controls.cutoff)?;
    let filtered = g.lowpass(source, cutoff)?;

    let gate = g.parameter(&controls.gate)?;
    let env = g.adsr(gate, AdsrParams::new(0.01, 0.2, 0.6, 0.8))?;
    let voice = g.multiply(&[filtered, env])?;

    // feedback echo
    let line = g.delay_line(echo_buffer)?;
    let echo_time = g.constant(ECHO_SECONDS)?;
    let echo = g.delay_reader(line, echo_time, max_block_size, echo_buffer - 1)?;
    let feedback = g.constant(ECHO_FEEDBACK)?;
    let echo_return = g.multiply(&[echo, feedback])?;
    let echo_in = g.add(&[voice, echo_return])?;
    g.delay_writer(line, echo_in)?;

    // air on the right
    let white = g.white_noise()?;
    let air_cutoff = g.constant(AIR_CUTOFF_HZ)?;
    let air = g.highpass(white, air_cutoff)?;
    let air_level = g.constant(AIR_LEVEL)?;
    let air = g.multiply(&[air, air_level, env])?;

    let dc_cutoff = g.constant(DC_CUTOFF_HZ)?;
    let left = g.add(&[voice, echo])?;
    let left = g.highpass(left, dc_cutoff)?;
    let right = g.add(&[voice, echo, air])?;
    let right = g.highpass(right, dc_cutoff)?;

    let (left, right) = g.stereo_limiter(left, right)?;
    tracing::debug!(nodes = g.node_count(), "built demo patch");

    Ok((Engine::new(g, left, right)?, controls))
}
