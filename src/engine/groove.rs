//! Intra-beat pulse placement for groove-mode channels
//!
//! Groove channels never fire on the master edge itself; the edge only
//! resets their beat reference. Each tick, every unasserted groove channel
//! is checked against its algorithm's target offset within the current
//! beat:
//!
//! - Swing: deterministic delayed off-beat, `beat/2 + beat/3 * amount`.
//! - Shuffle: deterministic triplet-leaning offset, `beat/2 + beat/6 * amount`,
//!   missed for good once the beat has elapsed.
//! - Humanize: the off-beat jittered by a uniform random offset. The jitter
//!   is applied as an absolute deadline checked on later ticks rather than
//!   a blocking delay, so other channels and fresh master edges keep being
//!   serviced.
//!
//! Detection windows are 15-20 ms wide, so the tick driver has to come
//! around at least once while the elapsed time is inside a window.

use super::channel::{Channel, GrooveType};
use super::Millis;
use crate::config::{GROOVE_TIMEOUT_MS, MIN_PLAUSIBLE_BPM};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SWING_WINDOW_MS: f64 = 20.0;
const SHUFFLE_WINDOW_MS: f64 = 15.0;
const HUMANIZE_WINDOW_MS: f64 = 20.0;

/// Humanize spreads up to this fraction of the beat at full amount.
const HUMANIZE_SPREAD: f64 = 0.4;

/// Target offset of a swing pulse within a beat of the given duration.
/// `amount` is normalized to 0.0..=1.0.
fn swing_target(beat_ms: f64, amount: f64) -> f64 {
    beat_ms / 2.0 + beat_ms / 3.0 * amount
}

/// Target offset of a shuffle pulse within a beat of the given duration.
fn shuffle_target(beat_ms: f64, amount: f64) -> f64 {
    beat_ms / 2.0 + beat_ms / 6.0 * amount
}

/// Evaluates groove-mode channels against elapsed time since their beat
/// reference. Owns the jitter source for the humanize algorithm.
#[derive(Debug)]
pub struct GrooveEngine {
    rng: StdRng,
}

impl GrooveEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic jitter source, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resets beat references for groove channels on a master edge. Groove
    /// channels never fire here; any pending humanized deadline from the
    /// previous beat is abandoned.
    pub fn on_master_edge(&mut self, channels: &mut [Channel], now: Millis) {
        for channel in channels.iter_mut() {
            if channel.config.is_groove() {
                channel.runtime.beat_reference = now;
                channel.runtime.pending_fire_at = None;
            }
        }
    }

    /// One tick of groove evaluation. Skipped entirely while the tempo is
    /// stale (no edge for 2 s) or implausible.
    pub fn evaluate(&mut self, channels: &mut [Channel], bpm: f64, last_edge: Millis, now: Millis) {
        if bpm < MIN_PLAUSIBLE_BPM || now.saturating_sub(last_edge) >= GROOVE_TIMEOUT_MS {
            return;
        }
        let beat_ms = 60_000.0 / bpm;

        for (idx, channel) in channels.iter_mut().enumerate() {
            if !channel.config.is_groove() || channel.runtime.output_asserted {
                continue;
            }
            let amount = f64::from(channel.config.amount) / 100.0;
            let elapsed = now.saturating_sub(channel.runtime.beat_reference) as f64;

            match channel.config.groove {
                GrooveType::Swing => {
                    let target = swing_target(beat_ms, amount);
                    if (elapsed - target).abs() <= SWING_WINDOW_MS {
                        trace!("Channel {} swing fired at +{} ms", idx, elapsed);
                        channel.runtime.assert_output(now);
                    }
                }
                GrooveType::Shuffle => {
                    if elapsed >= beat_ms {
                        // Window missed; nothing until the next master edge.
                        continue;
                    }
                    let target = shuffle_target(beat_ms, amount);
                    if (elapsed - target).abs() <= SHUFFLE_WINDOW_MS {
                        trace!("Channel {} shuffle fired at +{} ms", idx, elapsed);
                        channel.runtime.assert_output(now);
                    }
                }
                GrooveType::Humanize => {
                    if let Some(deadline) = channel.runtime.pending_fire_at {
                        if now >= deadline {
                            channel.runtime.pending_fire_at = None;
                            trace!("Channel {} humanize fired at deadline {}", idx, deadline);
                            channel.runtime.assert_output(now);
                        }
                        continue;
                    }
                    // Measured from the raw master-edge time; equal to the
                    // beat reference under current reset rules.
                    let since_edge = now.saturating_sub(last_edge) as f64;
                    if (since_edge - beat_ms / 2.0).abs() <= HUMANIZE_WINDOW_MS {
                        let spread = amount * HUMANIZE_SPREAD * beat_ms;
                        let jitter = if spread > 0.0 {
                            self.rng.gen_range(-spread..=spread)
                        } else {
                            0.0
                        };
                        if jitter <= 0.0 {
                            channel.runtime.assert_output(now);
                        } else {
                            channel.runtime.pending_fire_at = Some(now + jitter as Millis);
                        }
                    }
                }
                GrooveType::Straight => {}
            }
        }
    }
}

impl Default for GrooveEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::channel::ChannelConfig;

    fn groove_channel(groove: GrooveType, amount: u8, beat_reference: Millis) -> Channel {
        let mut channel = Channel {
            config: ChannelConfig {
                ratio: -1,
                groove,
                amount,
            },
            ..Channel::default()
        };
        channel.runtime.beat_reference = beat_reference;
        channel
    }

    #[test]
    fn test_swing_target_bounds() {
        // amount 0 lands exactly on the off-beat, amount 1 a third later.
        assert_eq!(swing_target(500.0, 0.0), 250.0);
        assert!((swing_target(500.0, 1.0) - (250.0 + 500.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_shuffle_target_bounds() {
        assert_eq!(shuffle_target(600.0, 0.0), 300.0);
        assert_eq!(shuffle_target(600.0, 1.0), 400.0);
    }

    #[test]
    fn test_swing_fires_inside_window_only() {
        let mut engine = GrooveEngine::with_seed(1);
        // 120 BPM, beat 500 ms, amount 50% -> target 333.3 ms.
        let mut channels = [groove_channel(GrooveType::Swing, 50, 1000)];
        engine.evaluate(&mut channels, 120.0, 1000, 1300);
        assert!(!channels[0].runtime.output_asserted);
        engine.evaluate(&mut channels, 120.0, 1000, 1333);
        assert!(channels[0].runtime.output_asserted);
        assert_eq!(channels[0].runtime.pulse_asserted_at, 1333);
    }

    #[test]
    fn test_shuffle_window_missed_after_beat_elapses() {
        let mut engine = GrooveEngine::with_seed(1);
        let mut channels = [groove_channel(GrooveType::Shuffle, 50, 1000)];
        // Driver never came around during the window; past one full beat
        // the pulse is skipped entirely.
        engine.evaluate(&mut channels, 120.0, 1000, 1500);
        assert!(!channels[0].runtime.output_asserted);
        engine.evaluate(&mut channels, 120.0, 1000, 1700);
        assert!(!channels[0].runtime.output_asserted);
    }

    #[test]
    fn test_humanize_schedules_deadline_not_blocking() {
        let mut engine = GrooveEngine::with_seed(42);
        let mut channels = [groove_channel(GrooveType::Humanize, 100, 1000)];
        // Walk tick by tick through the beat; the pulse must land between
        // the window opening and target + spread.
        let mut fired_at = None;
        for now in 1000..1800 {
            engine.evaluate(&mut channels, 120.0, 1000, now);
            if channels[0].runtime.output_asserted {
                fired_at = Some(now);
                break;
            }
        }
        let fired_at = fired_at.expect("humanize pulse never fired");
        // Window opens at 230 ms, spread reaches 0.4 * 500 = 200 ms.
        assert!(fired_at >= 1230);
        assert!(fired_at <= 1270 + 200);
    }

    #[test]
    fn test_pending_humanize_cleared_by_next_edge() {
        let mut engine = GrooveEngine::with_seed(7);
        let mut channels = [groove_channel(GrooveType::Humanize, 100, 1000)];
        for now in 1000..1271 {
            engine.evaluate(&mut channels, 120.0, 1000, now);
        }
        channels[0].runtime.output_asserted = false;
        engine.on_master_edge(&mut channels, 1500);
        assert_eq!(channels[0].runtime.pending_fire_at, None);
        assert_eq!(channels[0].runtime.beat_reference, 1500);
    }

    #[test]
    fn test_groove_suspended_when_tempo_stale_or_implausible() {
        let mut engine = GrooveEngine::with_seed(1);
        let mut channels = [groove_channel(GrooveType::Swing, 50, 1000)];
        // Stale: last edge over 2 s ago.
        engine.evaluate(&mut channels, 120.0, 1000, 3100);
        assert!(!channels[0].runtime.output_asserted);
        // Implausible tempo.
        engine.evaluate(&mut channels, 20.0, 1000, 1333);
        assert!(!channels[0].runtime.output_asserted);
    }
}
