//! Real-time clock-processing engine
//!
//! Converts one external tempo/trigger signal into six independently
//! configurable derived trigger outputs:
//! - [`PulseDetector`] for edge detection on the sampled input level
//! - [`TempoEstimator`] for the BPM estimate behind groove timing and the
//!   display
//! - [`control`] for the divide/multiply configuration state machine
//! - division scheduling, [`GrooveEngine`] and pulse expiry for the six
//!   channels
//!
//! The engine runs in a single cooperative context: an external driver
//! calls [`Engine::tick`] repeatedly, and all timing is soft, bounded by
//! how often the driver comes around.

pub mod channel;
pub mod control;
mod detector;
mod division;
mod expiry;
mod groove;
mod tempo;

pub use channel::{Channel, ChannelConfig, ChannelRuntime, GrooveType};
pub use control::Command;
pub use detector::{EdgeEvent, EdgeKind, PulseDetector};
pub use groove::GrooveEngine;
pub use tempo::TempoEstimator;

use crate::config::NUM_CHANNELS;
use log::info;

/// Monotonic timestamp in milliseconds since the driver started.
pub type Millis = u64;

/// The clock engine: six channels plus the shared detection and tempo
/// state, advanced by an external tick driver.
#[derive(Debug)]
pub struct Engine {
    detector: PulseDetector,
    tempo: TempoEstimator,
    groove: GrooveEngine,
    channels: [Channel; NUM_CHANNELS],
    selected: usize,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_groove(GrooveEngine::new())
    }

    /// Engine with a deterministic humanize jitter source, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_groove(GrooveEngine::with_seed(seed))
    }

    fn with_groove(groove: GrooveEngine) -> Self {
        Self {
            detector: PulseDetector::new(),
            tempo: TempoEstimator::new(),
            groove,
            channels: [Channel::default(); NUM_CHANNELS],
            selected: 0,
        }
    }

    /// One scheduler tick.
    ///
    /// Ordering within a tick is a hard guarantee: edge detection first;
    /// on a rising edge the tempo update, division firing and
    /// beat-reference resets; then groove evaluation; then pulse expiry.
    /// Across ticks there is no minimum resolution, so a slow driver can
    /// miss a groove detection window entirely.
    pub fn tick(&mut self, level: f32, now: Millis) {
        if let Some(edge) = self.detector.sample(level, now) {
            if edge.kind == EdgeKind::Rising {
                self.on_master_edge(edge.at);
            }
        }
        self.groove.evaluate(
            &mut self.channels,
            self.tempo.bpm(),
            self.tempo.last_edge_time(),
            now,
        );
        expiry::release_expired(&mut self.channels, now);
    }

    fn on_master_edge(&mut self, now: Millis) {
        self.tempo.on_master_edge(now);
        division::on_master_edge(&mut self.channels, now);
        self.groove.on_master_edge(&mut self.channels, now);
    }

    /// Applies one configuration command to the selected channel.
    ///
    /// Transitions overwrite the channel configuration atomically; runtime
    /// counters survive, so the first pulse after a mode change may fire
    /// off a count accumulated under the previous mode.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SelectNext => {
                self.selected = (self.selected + 1) % NUM_CHANNELS;
                info!("Selected channel {}", self.selected);
            }
            Command::Divide => {
                let next = control::divide(self.channels[self.selected].config);
                self.set_selected_config(next);
            }
            Command::Multiply => {
                let next = control::multiply(self.channels[self.selected].config);
                self.set_selected_config(next);
            }
        }
    }

    fn set_selected_config(&mut self, next: ChannelConfig) {
        self.channels[self.selected].config = next;
        info!(
            "Channel {} configured: ratio={} groove={:?} amount={}%",
            self.selected, next.ratio, next.groove, next.amount
        );
    }

    /// Current state of the six trigger lines.
    pub fn outputs(&self) -> [bool; NUM_CHANNELS] {
        let mut states = [false; NUM_CHANNELS];
        for (state, channel) in states.iter_mut().zip(self.channels.iter()) {
            *state = channel.runtime.output_asserted;
        }
        states
    }

    /// Thresholded input state, mirrored on the indicator line.
    pub fn input_high(&self) -> bool {
        self.detector.is_high()
    }

    pub fn channels(&self) -> &[Channel; NUM_CHANNELS] {
        &self.channels
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn tempo(&self) -> &TempoEstimator {
        &self.tempo
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
