//! Output peak and limiter gain reduction.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use blockdsp::io::tap::MeterFrame;

/// Peak hold falls by this factor every UI frame.
const PEAK_FALL: f32 = 0.93;

#[derive(Debug, Default)]
pub struct MeterState {
    peak: f32,
    divisor: f64,
    limiting: bool,
    engaged_blocks: u64,
}

impl MeterState {
    pub fn update(&mut self, frame: &MeterFrame) {
        self.peak = self.peak.max(frame.peak);
        self.divisor = frame.divisor;
        self.limiting = frame.limiter_engaged;
        if frame.limiter_engaged {
            self.engaged_blocks += 1;
        }
    }

    pub fn decay(&mut self) {
        self.peak *= PEAK_FALL;
    }

    fn reduction_db(&self) -> f64 {
        20.0 * self.divisor.max(1.0).log10()
    }
}

pub fn render_meter(frame: &mut Frame, area: Rect, meter: &MeterState) {
    let rows = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let peak = Gauge::default()
        .block(Block::default().title(" Peak ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(meter.peak.clamp(0.0, 1.0) as f64)
        .label(format!("{:.2}", meter.peak));
    frame.render_widget(peak, rows[0]);

    let reduction = meter.reduction_db();
    let limiter = Gauge::default()
        .block(
            Block::default()
                .title(format!(" Limiter ({} blocks) ", meter.engaged_blocks))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(if meter.limiting { Color::Red } else { Color::DarkGray }))
        // 12 dB of reduction fills the bar
        .ratio((reduction / 12.0).clamp(0.0, 1.0))
        .label(format!("-{reduction:.1} dB"));
    frame.render_widget(limiter, rows[1]);
}
