//! Edge-counting scheduler for division-mode channels

use super::channel::Channel;
use super::Millis;
use log::trace;

/// Advances every division-mode channel (`ratio >= 1`) for one master edge.
///
/// Each such channel counts the edge and resets its beat reference. Unity
/// channels fire on every edge; a ratio of N fires on every Nth edge,
/// 1-indexed from the first edge observed.
pub fn on_master_edge(channels: &mut [Channel], now: Millis) {
    for (idx, channel) in channels.iter_mut().enumerate() {
        if channel.config.ratio < 1 {
            continue;
        }
        channel.runtime.pulse_count += 1;
        channel.runtime.beat_reference = now;

        let ratio = channel.config.ratio as u64;
        if channel.runtime.pulse_count % ratio == 0 {
            trace!(
                "Channel {} fired on master edge {} (1/{})",
                idx,
                channel.runtime.pulse_count,
                ratio
            );
            channel.runtime.assert_output(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::channel::ChannelConfig;

    fn division_channel(ratio: i32) -> Channel {
        Channel {
            config: ChannelConfig {
                ratio,
                ..ChannelConfig::default()
            },
            ..Channel::default()
        }
    }

    #[test]
    fn test_unity_fires_on_every_edge() {
        let mut channels = [division_channel(1)];
        for edge in 0..5u64 {
            let now = 1000 + edge * 500;
            on_master_edge(&mut channels, now);
            assert!(channels[0].runtime.output_asserted);
            assert_eq!(channels[0].runtime.pulse_asserted_at, now);
            assert_eq!(channels[0].runtime.beat_reference, now);
            channels[0].runtime.output_asserted = false;
        }
        assert_eq!(channels[0].runtime.pulse_count, 5);
    }

    #[test]
    fn test_ratio_fires_on_every_nth_edge() {
        let mut channels = [division_channel(4)];
        let mut fired = Vec::new();
        for edge in 1..=16u64 {
            on_master_edge(&mut channels, 1000 + edge * 500);
            if channels[0].runtime.output_asserted {
                fired.push(edge);
                channels[0].runtime.output_asserted = false;
            }
        }
        assert_eq!(fired, vec![4, 8, 12, 16]);
    }

    #[test]
    fn test_groove_channels_are_ignored() {
        let mut channels = [division_channel(-1)];
        on_master_edge(&mut channels, 1000);
        assert_eq!(channels[0].runtime.pulse_count, 0);
        assert!(!channels[0].runtime.output_asserted);
        assert_eq!(channels[0].runtime.beat_reference, 0);
    }
}
