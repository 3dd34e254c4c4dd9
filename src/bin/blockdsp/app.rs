//! Device setup and the audio callback.

use std::fs::File;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use blockdsp::io::{self, tap};
use blockdsp::{patch, EngineConfig};

use crate::ui::UiApp;

const LOG_FILE: &str = "blockdsp.log";
/// About a third of a second of mono preview at 48 kHz.
const PREVIEW_CAPACITY: usize = 16_384;
const METER_CAPACITY: usize = 256;

/// Install a file logger fed through a background writer thread, so events
/// raised inside the audio callback never wait on disk. Keep the guard alive
/// until exit; dropping it flushes what is still queued.
pub fn init_logging() -> EyreResult<WorkerGuard> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))?;
    Ok(guard)
}

pub fn run() -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let supported = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    if supported.sample_format() != SampleFormat::F32 {
        return Err(eyre!(
            "output device uses {:?} samples, only f32 is supported",
            supported.sample_format()
        ));
    }

    let sample_rate = supported.sample_rate().0 as f64;
    let channels = supported.channels() as usize;
    info!(
        device = %device.name().unwrap_or_else(|_| "<unnamed>".into()),
        sample_rate,
        channels,
        "opening output device"
    );

    let config = EngineConfig {
        sample_rate,
        ..EngineConfig::default()
    };
    let (mut engine, controls) = patch::demo(config).wrap_err("failed to build demo patch")?;
    let (mut output_tap, receiver) = tap::output_tap(PREVIEW_CAPACITY, METER_CAPACITY);

    // The engine moves into the callback; the UI only talks to it through
    // parameter handles and the tap.
    let stream = device
        .build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| {
                let rendered = io::fill_interleaved_with(&mut engine, data, channels, |block, report| {
                    output_tap.push_block(block, report)
                });
                if let Err(err) = rendered {
                    data.fill(0.0);
                    error!(%err, "render failed");
                }
            },
            |err| error!(%err, "audio stream error"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    stream.play().wrap_err("failed to start output stream")?;

    let mut terminal = ratatui::init();
    let result = UiApp::new(receiver, controls, sample_rate).run(&mut terminal);
    ratatui::restore();

    info!("shutting down");
    result
}
