use super::Millis;
use crate::config::{DIVISION_PULSE_WIDTH_MS, GROOVE_PULSE_WIDTH_MS};

/// Groove algorithm selector. Only meaningful while the channel's ratio is
/// negative; division channels stay on `Straight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrooveType {
    Straight,
    Swing,
    Shuffle,
    Humanize,
}

impl GrooveType {
    /// Single-letter code used on the display.
    pub fn code(self) -> char {
        match self {
            GrooveType::Straight => '-',
            GrooveType::Swing => 'S',
            GrooveType::Shuffle => 'F',
            GrooveType::Humanize => 'H',
        }
    }
}

/// Per-channel configuration, mutated only through the command state
/// machine.
///
/// `ratio` is never 0: positive values are clock division factors (1 is
/// unity passthrough), negative values mark groove mode. `amount` is a
/// percentage and is nonzero only while the channel is in groove mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub ratio: i32,
    pub groove: GrooveType,
    pub amount: u8,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            ratio: 1,
            groove: GrooveType::Straight,
            amount: 0,
        }
    }
}

impl ChannelConfig {
    pub fn is_groove(&self) -> bool {
        self.ratio < 0
    }

    /// Mode-dependent pulse width: groove pulses are held 5x longer.
    pub fn pulse_width_ms(&self) -> Millis {
        if self.is_groove() {
            GROOVE_PULSE_WIDTH_MS
        } else {
            DIVISION_PULSE_WIDTH_MS
        }
    }
}

/// Per-channel scheduling state, mutated every tick.
///
/// `pulse_asserted_at` is meaningful only while `output_asserted` is true.
/// Counters deliberately survive configuration changes; see the command
/// state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelRuntime {
    /// Master edges observed while this channel was in division mode.
    pub pulse_count: u64,
    pub output_asserted: bool,
    pub pulse_asserted_at: Millis,
    /// Zero-point for groove offset calculations, reset on every master
    /// edge.
    pub beat_reference: Millis,
    /// Absolute deadline for a humanized pulse scheduled earlier in the
    /// beat. Cleared by the next master edge.
    pub pending_fire_at: Option<Millis>,
}

impl ChannelRuntime {
    /// Turns the output on. Expiry is the only path that turns it off.
    pub(crate) fn assert_output(&mut self, now: Millis) {
        self.output_asserted = true;
        self.pulse_asserted_at = now;
    }
}

/// One of the six derived trigger channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Channel {
    pub config: ChannelConfig,
    pub runtime: ChannelRuntime,
}
