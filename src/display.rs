//! Read-only display snapshot
//!
//! The renderer never reaches into the engine; it consumes a small
//! snapshot built here: the integer BPM (or a placeholder once the tempo
//! goes stale) and one compact label per channel.

use crate::config::{DISPLAY_STALE_MS, NUM_CHANNELS};
use crate::engine::{ChannelConfig, Engine, Millis};

/// Shown in place of the BPM once no edge has arrived for 3 s.
pub const STALE_BPM_LABEL: &str = "---";

/// Suffixed to the label of the channel being edited.
const SELECTION_MARKER: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub bpm_label: String,
    pub channel_labels: [String; NUM_CHANNELS],
}

/// Builds the snapshot consumed by the renderer.
pub fn snapshot(engine: &Engine, now: Millis) -> DisplaySnapshot {
    let bpm_label = if engine.tempo().is_stale(now, DISPLAY_STALE_MS) {
        STALE_BPM_LABEL.to_string()
    } else {
        format!("{}", engine.tempo().bpm().round() as u32)
    };

    let mut channel_labels: [String; NUM_CHANNELS] = Default::default();
    for (idx, channel) in engine.channels().iter().enumerate() {
        channel_labels[idx] = channel_label(idx, &channel.config, idx == engine.selected());
    }

    DisplaySnapshot {
        bpm_label,
        channel_labels,
    }
}

/// Compact per-channel label: `1:1:1` for unity, `1:1/4` for division,
/// `1:GS50%` for groove (S/F/H for swing, shuffle, humanize).
pub fn channel_label(idx: usize, config: &ChannelConfig, selected: bool) -> String {
    let n = idx + 1;
    let mut label = if config.ratio < 0 {
        format!("{}:G{}{}%", n, config.groove.code(), config.amount)
    } else if config.ratio == 1 {
        format!("{}:1:1", n)
    } else {
        format!("{}:1/{}", n, config.ratio)
    };
    if selected {
        label.push(SELECTION_MARKER);
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GrooveType;

    #[test]
    fn test_channel_labels() {
        let unity = ChannelConfig::default();
        assert_eq!(channel_label(0, &unity, false), "1:1:1");
        assert_eq!(channel_label(0, &unity, true), "1:1:1*");

        let division = ChannelConfig {
            ratio: 4,
            ..ChannelConfig::default()
        };
        assert_eq!(channel_label(1, &division, false), "2:1/4");

        let groove = ChannelConfig {
            ratio: -1,
            groove: GrooveType::Shuffle,
            amount: 75,
        };
        assert_eq!(channel_label(2, &groove, false), "3:GF75%");
    }
}
