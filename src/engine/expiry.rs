//! Pulse-width bookkeeping
//!
//! The sole writer that turns outputs off; every scheduling path only turns
//! them on.

use super::channel::Channel;
use super::Millis;

/// Deasserts any output whose mode-specific pulse width has elapsed.
pub fn release_expired(channels: &mut [Channel], now: Millis) {
    for channel in channels.iter_mut() {
        if channel.runtime.output_asserted
            && now.saturating_sub(channel.runtime.pulse_asserted_at) >= channel.config.pulse_width_ms()
        {
            channel.runtime.output_asserted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DIVISION_PULSE_WIDTH_MS, GROOVE_PULSE_WIDTH_MS};
    use crate::engine::channel::{ChannelConfig, GrooveType};

    fn asserted_channel(ratio: i32, at: Millis) -> Channel {
        let mut channel = Channel {
            config: ChannelConfig {
                ratio,
                groove: if ratio < 0 {
                    GrooveType::Swing
                } else {
                    GrooveType::Straight
                },
                amount: if ratio < 0 { 50 } else { 0 },
            },
            ..Channel::default()
        };
        channel.runtime.assert_output(at);
        channel
    }

    #[test]
    fn test_division_pulse_released_after_fixed_width() {
        let mut channels = [asserted_channel(2, 1000)];
        release_expired(&mut channels, 1000 + DIVISION_PULSE_WIDTH_MS - 1);
        assert!(channels[0].runtime.output_asserted);
        release_expired(&mut channels, 1000 + DIVISION_PULSE_WIDTH_MS);
        assert!(!channels[0].runtime.output_asserted);
    }

    #[test]
    fn test_groove_pulse_is_five_times_wider() {
        assert_eq!(GROOVE_PULSE_WIDTH_MS, 5 * DIVISION_PULSE_WIDTH_MS);
        let mut channels = [asserted_channel(-1, 1000)];
        release_expired(&mut channels, 1000 + GROOVE_PULSE_WIDTH_MS - 1);
        assert!(channels[0].runtime.output_asserted);
        release_expired(&mut channels, 1000 + GROOVE_PULSE_WIDTH_MS);
        assert!(!channels[0].runtime.output_asserted);
    }

    #[test]
    fn test_unasserted_channels_untouched() {
        let mut channels = [Channel::default()];
        release_expired(&mut channels, 50_000);
        assert!(!channels[0].runtime.output_asserted);
    }
}
