//! blockdsp - play the demo patch on the default output device
//!
//! Run with: cargo run --release
//!
//! Space toggles the gate, arrow keys move pitch and cutoff, q quits. Logs
//! go to `blockdsp.log` since the terminal belongs to the UI.

mod app;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _log_guard = app::init_logging()?;
    app::run()
}
