//! Command state machine for per-channel configuration
//!
//! Divide walks a channel down the division chain (1, 2, 4, ... 64,
//! clamped) or drops it back to unity from groove mode. Multiply walks the
//! chain back up; from unity it enters groove mode and then cycles the
//! groove algorithms, escalating the amount by 25% each full cycle until
//! the channel falls back to unity.
//!
//! Every transition is an atomic overwrite of the channel configuration.
//! Runtime counters are left untouched on purpose: the first pulse after a
//! mode change may fire off a count accumulated under the previous mode,
//! matching the hardware.

use super::channel::{ChannelConfig, GrooveType};
use crate::config::MAX_RATIO;

/// Commands issued by the button collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectNext,
    Divide,
    Multiply,
}

/// Next configuration after a divide command.
pub fn divide(current: ChannelConfig) -> ChannelConfig {
    if current.ratio < 0 {
        // Groove mode drops straight back to unity.
        ChannelConfig::default()
    } else if current.ratio == 1 {
        ChannelConfig {
            ratio: 2,
            ..ChannelConfig::default()
        }
    } else {
        ChannelConfig {
            ratio: (current.ratio * 2).min(MAX_RATIO),
            ..ChannelConfig::default()
        }
    }
}

/// Next configuration after a multiply command.
pub fn multiply(current: ChannelConfig) -> ChannelConfig {
    if current.ratio < 0 {
        next_groove(current)
    } else if current.ratio == 1 {
        // Unity enters groove mode at half strength.
        ChannelConfig {
            ratio: -1,
            groove: GrooveType::Swing,
            amount: 50,
        }
    } else if current.ratio == 2 {
        ChannelConfig::default()
    } else {
        ChannelConfig {
            ratio: current.ratio / 2,
            ..ChannelConfig::default()
        }
    }
}

/// Advances the groove cycle: Swing -> Shuffle -> Humanize, then wraps to
/// Swing with the amount escalated by 25 (capped at 100). An amount past
/// 75 after escalation abandons groove mode for unity.
fn next_groove(current: ChannelConfig) -> ChannelConfig {
    match current.groove {
        GrooveType::Swing => ChannelConfig {
            groove: GrooveType::Shuffle,
            ..current
        },
        GrooveType::Shuffle => ChannelConfig {
            groove: GrooveType::Humanize,
            ..current
        },
        GrooveType::Humanize | GrooveType::Straight => {
            let amount = current.amount.saturating_add(25).min(100);
            if amount > 75 {
                ChannelConfig::default()
            } else {
                ChannelConfig {
                    groove: GrooveType::Swing,
                    amount,
                    ..current
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_chain_clamps_at_64() {
        let mut config = ChannelConfig::default();
        let expected = [2, 4, 8, 16, 32, 64, 64, 64];
        for ratio in expected {
            config = divide(config);
            assert_eq!(config.ratio, ratio);
            assert_eq!(config.groove, GrooveType::Straight);
            assert_eq!(config.amount, 0);
        }
    }

    #[test]
    fn test_multiply_chain_back_to_unity() {
        let mut config = ChannelConfig {
            ratio: 64,
            ..ChannelConfig::default()
        };
        for ratio in [32, 16, 8, 4, 2, 1] {
            config = multiply(config);
            assert_eq!(config.ratio, ratio);
        }
        assert_eq!(config, ChannelConfig::default());
    }

    #[test]
    fn test_groove_cycle_escalates_then_reverts() {
        let mut config = multiply(ChannelConfig::default());
        assert_eq!(config.ratio, -1);
        assert_eq!(config.groove, GrooveType::Swing);
        assert_eq!(config.amount, 50);

        let expected = [
            (GrooveType::Shuffle, 50),
            (GrooveType::Humanize, 50),
            (GrooveType::Swing, 75),
            (GrooveType::Shuffle, 75),
            (GrooveType::Humanize, 75),
        ];
        for (groove, amount) in expected {
            config = multiply(config);
            assert_eq!(config.ratio, -1);
            assert_eq!(config.groove, groove);
            assert_eq!(config.amount, amount);
        }

        // 75 escalates to 100, which abandons groove mode.
        config = multiply(config);
        assert_eq!(config, ChannelConfig::default());
    }

    #[test]
    fn test_divide_from_groove_restores_unity() {
        let groove = ChannelConfig {
            ratio: -1,
            groove: GrooveType::Shuffle,
            amount: 75,
        };
        assert_eq!(divide(groove), ChannelConfig::default());
    }

    #[test]
    fn test_config_invariants_hold_across_transitions() {
        let mut config = ChannelConfig::default();
        for step in 0..50 {
            config = if step % 3 == 0 {
                divide(config)
            } else {
                multiply(config)
            };
            assert_ne!(config.ratio, 0);
            assert!(config.amount <= 100);
            assert!(config.amount == 0 || config.ratio < 0);
        }
    }
}
