//! Tempo estimation from master-edge timestamps

use super::Millis;
use crate::config::MIN_PLAUSIBLE_BPM;
use log::debug;

/// Number of edge timestamps retained for averaging.
const EDGE_HISTORY: usize = 3;

/// Derives a BPM estimate from the most recent master edges.
///
/// Keeps a short ring of edge timestamps and averages the deltas between
/// consecutive recorded edges. Implausible results (at or below 30 BPM)
/// never overwrite the last valid estimate. The estimator does not expire
/// itself; consumers check [`TempoEstimator::is_stale`] against their own
/// timeout.
#[derive(Debug, Default)]
pub struct TempoEstimator {
    /// Oldest first; a zero entry means "not yet recorded".
    edges: [Millis; EDGE_HISTORY],
    last_valid_bpm: f64,
    last_edge_time: Millis,
}

impl TempoEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a master edge and refreshes the estimate.
    pub fn on_master_edge(&mut self, now: Millis) {
        self.edges.rotate_left(1);
        self.edges[EDGE_HISTORY - 1] = now;
        self.last_edge_time = now;

        let raw = self.compute_bpm();
        if raw > MIN_PLAUSIBLE_BPM {
            self.last_valid_bpm = raw;
        } else {
            debug!("Discarding implausible tempo estimate: {:.1} BPM", raw);
        }
    }

    /// Raw BPM from the averaged deltas between consecutive recorded edges.
    ///
    /// Falls back to the last plausible value (or 0.0 before any exists)
    /// when fewer than two edges have been recorded. The raw value may be
    /// implausible; callers that need a vetted tempo use [`TempoEstimator::bpm`].
    pub fn compute_bpm(&self) -> f64 {
        let mut delta_sum: u64 = 0;
        let mut delta_count: u32 = 0;
        for pair in self.edges.windows(2) {
            if pair[0] > 0 && pair[1] > pair[0] {
                delta_sum += pair[1] - pair[0];
                delta_count += 1;
            }
        }
        if delta_count == 0 {
            return self.last_valid_bpm;
        }
        let average_delta_ms = delta_sum as f64 / f64::from(delta_count);
        60_000.0 / average_delta_ms
    }

    /// Last plausible tempo estimate, 0.0 until one exists.
    pub fn bpm(&self) -> f64 {
        self.last_valid_bpm
    }

    /// Timestamp of the most recent master edge.
    pub fn last_edge_time(&self) -> Millis {
        self.last_edge_time
    }

    /// Whether the given timeout has elapsed since the last master edge.
    pub fn is_stale(&self, now: Millis, timeout_ms: Millis) -> bool {
        now.saturating_sub(self.last_edge_time) >= timeout_ms
    }
}
