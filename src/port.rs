//! Hardware abstraction for the clock input, trigger outputs and buttons
//!
//! The engine never touches pins; it consumes a sampled input level and
//! publishes boolean line states. Desktop builds run against the simulated
//! clock input and a logging output bank; tests script their own
//! implementations.

use crate::config::NUM_CHANNELS;
use crate::engine::Millis;
use log::{info, trace};

/// Source of the instantaneous input level, as a fraction of full scale
/// (0.0..=1.0).
pub trait InputPort: Send {
    fn level(&mut self, now: Millis) -> f32;
}

/// Sink for the six trigger lines plus the input indicator line.
pub trait OutputBank: Send {
    fn set_output(&mut self, channel: usize, high: bool);
    fn set_indicator(&mut self, high: bool);
}

/// Source of the raw (undebounced) panel button levels: select, divide,
/// multiply.
pub trait ControlPort: Send {
    fn levels(&mut self, now: Millis) -> [bool; 3];
}

/// Square-wave level source standing in for an external clock signal.
pub struct SimulatedClockInput {
    period_ms: u64,
    duty: f32,
}

impl SimulatedClockInput {
    pub fn new(bpm: u32, duty: f32) -> Self {
        let bpm = bpm.max(1);
        info!("Simulated clock input at {} BPM", bpm);
        Self {
            // Periods shorter than the millisecond clock resolution clamp
            // to 1 ms rather than truncating to zero.
            period_ms: (60_000 / u64::from(bpm)).max(1),
            duty: duty.clamp(0.05, 0.95),
        }
    }
}

impl InputPort for SimulatedClockInput {
    fn level(&mut self, now: Millis) -> f32 {
        let phase = (now % self.period_ms) as f32 / self.period_ms as f32;
        if phase < self.duty {
            1.0
        } else {
            0.0
        }
    }
}

/// Output bank for desktop runs: logs line transitions instead of driving
/// pins.
#[derive(Debug, Default)]
pub struct LogOutputBank {
    outputs: [bool; NUM_CHANNELS],
    indicator: bool,
}

impl LogOutputBank {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputBank for LogOutputBank {
    fn set_output(&mut self, channel: usize, high: bool) {
        if self.outputs[channel] != high {
            self.outputs[channel] = high;
            trace!("Output {} {}", channel, if high { "high" } else { "low" });
        }
    }

    fn set_indicator(&mut self, high: bool) {
        if self.indicator != high {
            self.indicator = high;
            trace!("Indicator {}", if high { "high" } else { "low" });
        }
    }
}

/// Records the latest line states; used by tests.
#[derive(Debug, Default)]
pub struct MockOutputBank {
    pub outputs: [bool; NUM_CHANNELS],
    pub indicator: bool,
}

impl MockOutputBank {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputBank for MockOutputBank {
    fn set_output(&mut self, channel: usize, high: bool) {
        self.outputs[channel] = high;
    }

    fn set_indicator(&mut self, high: bool) {
        self.indicator = high;
    }
}
