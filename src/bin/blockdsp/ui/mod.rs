//! Terminal UI: oscilloscope, spectrum and limiter meter.

mod meter;
mod spectrum;
mod waveform;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};

use blockdsp::io::tap::TapReceiver;
use blockdsp::patch::DemoControls;

use meter::{render_meter, MeterState};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use waveform::render_waveform;

/// Samples kept for the scope and the FFT.
const PREVIEW_LEN: usize = 2048;

const PITCH_RANGE: (f32, f32) = (27.5, 1_760.0);
const CUTOFF_RANGE: (f32, f32) = (40.0, 18_000.0);
/// One semitone.
const PITCH_STEP: f32 = 1.059_463_1;
/// A sixth of an octave.
const CUTOFF_STEP: f32 = 1.122_462;

pub struct UiApp {
    receiver: TapReceiver,
    controls: DemoControls,
    preview: Vec<f32>,
    analyzer: SpectrumAnalyzer,
    meter: MeterState,
    sample_rate: f64,
    should_quit: bool,
}

impl UiApp {
    pub fn new(receiver: TapReceiver, controls: DemoControls, sample_rate: f64) -> Self {
        Self {
            receiver,
            controls,
            preview: vec![0.0; PREVIEW_LEN],
            analyzer: SpectrumAnalyzer::new(PREVIEW_LEN, sample_rate),
            meter: MeterState::default(),
            sample_rate,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.receiver.drain_samples(&mut self.preview, PREVIEW_LEN);
            if let Some(frame) = self.receiver.latest_meter() {
                self.meter.update(&frame);
            }
            self.meter.decay();
            self.analyzer.update(&self.preview);

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => {
                let open = self.controls.gate.get() >= 0.5;
                self.controls.gate.set(if open { 0.0 } else { 1.0 });
            }
            KeyCode::Up => step(&self.controls.cutoff, CUTOFF_STEP, CUTOFF_RANGE),
            KeyCode::Down => step(&self.controls.cutoff, CUTOFF_STEP.recip(), CUTOFF_RANGE),
            KeyCode::Right => step(&self.controls.pitch, PITCH_STEP, PITCH_RANGE),
            KeyCode::Left => step(&self.controls.pitch, PITCH_STEP.recip(), PITCH_RANGE),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status
                Constraint::Min(8),    // Scope
                Constraint::Min(8),    // Spectrum
                Constraint::Length(4), // Limiter
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        self.render_status(frame, chunks[0]);
        render_waveform(frame, chunks[1], &self.preview);
        render_spectrum(frame, chunks[2], self.analyzer.data());
        render_meter(frame, chunks[3], &self.meter);

        let help = Paragraph::new(" [Space] Gate  [↑/↓] Cutoff  [←/→] Pitch  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let gate_open = self.controls.gate.get() >= 0.5;
        let line = Line::from(vec![
            Span::styled(
                if gate_open { " ● gate open   " } else { " ○ gate closed " },
                Style::default().fg(if gate_open { Color::Green } else { Color::Yellow }),
            ),
            Span::styled(
                format!(" pitch {:>7.1} Hz ", self.controls.pitch.get()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!(" cutoff {:>7.0} Hz ", self.controls.cutoff.get()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!(" {:.1} kHz", self.sample_rate / 1000.0),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let status = Paragraph::new(line).block(Block::default().title(" blockdsp ").borders(Borders::ALL));
        frame.render_widget(status, area);
    }
}

/// Scale a parameter by `ratio`, staying inside `range`.
fn step(param: &blockdsp::ParamHandle, ratio: f32, (lo, hi): (f32, f32)) {
    param.set((param.get() * ratio).clamp(lo, hi));
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdsp::ParamHandle;

    #[test]
    fn step_clamps_to_range() {
        let p = ParamHandle::new(1_700.0);
        step(&p, PITCH_STEP, PITCH_RANGE);
        assert_eq!(p.get(), 1_760.0);

        let p = ParamHandle::new(440.0);
        step(&p, PITCH_STEP, PITCH_RANGE);
        step(&p, PITCH_STEP.recip(), PITCH_RANGE);
        assert!((p.get() - 440.0).abs() < 1e-3);
    }
}
