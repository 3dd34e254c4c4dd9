//! Log-frequency spectrum of the mono preview.

use std::f32::consts::PI;
use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const POINTS: usize = 64;
const LOW_HZ: f64 = 30.0;
const FLOOR_DB: f64 = -96.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    /// Normalises a full-scale sine to 0 dB.
    gain: f32,
    buffer: Vec<Complex<f32>>,
    /// FFT bin behind every plotted point.
    bins: Vec<usize>,
    /// `(log10 Hz, dB)` per point.
    points: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(size: usize, sample_rate: f64) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(size);
        let window: Vec<f32> = (0..size)
            .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / size as f32).cos())
            .collect();
        let gain = 2.0 / window.iter().sum::<f32>().max(f32::EPSILON);

        let nyquist = sample_rate / 2.0;
        let last_bin = (size / 2).saturating_sub(1).max(1);
        let (bins, points) = (0..POINTS)
            .map(|i| {
                let t = i as f64 / (POINTS - 1) as f64;
                let hz = LOW_HZ * (nyquist / LOW_HZ).powf(t);
                let bin = ((hz * size as f64 / sample_rate).round() as usize).clamp(1, last_bin);
                (bin, (hz.log10(), FLOOR_DB))
            })
            .unzip();

        Self {
            fft,
            window,
            gain,
            buffer: vec![Complex::new(0.0, 0.0); size],
            bins,
            points,
        }
    }

    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for ((slot, &s), &w) in self.buffer.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.buffer);

        for (point, &bin) in self.points.iter_mut().zip(&self.bins) {
            let magnitude = self.buffer[bin].norm() * self.gain;
            point.1 = (20.0 * (magnitude as f64).max(1e-9).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, points: &[(f64, f64)]) {
    let (lo, hi) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if last.0 > first.0 => (first.0, last.0),
        _ => (0.0, 1.0),
    };

    let trace = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(points);

    let chart = Chart::new(vec![trace])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec![
                    format!("{:.0}", 10f64.powf(lo)),
                    "1k".to_string(),
                    format!("{:.0}k", 10f64.powf(hi) / 1000.0),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 6.0])
                .labels(vec!["-96", "-48", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
