//! Lock-free tap from the audio callback to a UI thread.
//!
//! The producer half lives in the audio callback and only ever `push`es;
//! when a queue is full the data is dropped rather than waiting on the
//! reader.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::graph::BlockReport;

/// Per-block levels for meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterFrame {
    pub sample_count: usize,
    /// Largest absolute sample across both channels after limiting.
    pub peak: f32,
    pub divisor: f64,
    pub limiter_engaged: bool,
}

impl MeterFrame {
    pub fn from_block(interleaved: &[f32], report: &BlockReport) -> Self {
        let peak = interleaved.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        Self {
            sample_count: report.sample_count,
            peak,
            divisor: report.max_divisor,
            limiter_engaged: report.limiter_engaged,
        }
    }
}

/// Audio-thread half.
pub struct OutputTap {
    samples: Producer<f32>,
    meters: Producer<MeterFrame>,
    dropped: usize,
}

/// UI-thread half.
pub struct TapReceiver {
    pub samples: Consumer<f32>,
    pub meters: Consumer<MeterFrame>,
}

/// Create a tap holding up to `sample_capacity` mono preview samples and
/// `meter_capacity` meter frames.
pub fn output_tap(sample_capacity: usize, meter_capacity: usize) -> (OutputTap, TapReceiver) {
    let (sample_tx, sample_rx) = RingBuffer::new(sample_capacity);
    let (meter_tx, meter_rx) = RingBuffer::new(meter_capacity);
    (
        OutputTap {
            samples: sample_tx,
            meters: meter_tx,
            dropped: 0,
        },
        TapReceiver {
            samples: sample_rx,
            meters: meter_rx,
        },
    )
}

impl OutputTap {
    /// Forward one interleaved stereo block: a mono preview sample per
    /// frame plus one meter frame.
    pub fn push_block(&mut self, interleaved: &[f32], report: &BlockReport) {
        for frame in interleaved.chunks_exact(2) {
            if self.samples.push((frame[0] + frame[1]) * 0.5).is_err() {
                self.dropped += 1;
            }
        }
        if self
            .meters
            .push(MeterFrame::from_block(interleaved, report))
            .is_err()
        {
            self.dropped += 1;
        }
    }

    /// Items discarded because the receiver fell behind.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl TapReceiver {
    /// Append every pending preview sample to `out`, keeping at most
    /// `keep` of the newest.
    pub fn drain_samples(&mut self, out: &mut Vec<f32>, keep: usize) {
        while let Ok(sample) = self.samples.pop() {
            out.push(sample);
        }
        if out.len() > keep {
            let excess = out.len() - keep;
            out.drain(..excess);
        }
    }

    /// Most recent meter frame, discarding older ones.
    pub fn latest_meter(&mut self) -> Option<MeterFrame> {
        let mut latest = None;
        while let Ok(frame) = self.meters.pop() {
            latest = Some(frame);
        }
        latest
    }
}
