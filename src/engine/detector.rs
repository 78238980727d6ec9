use super::Millis;
use crate::config::INPUT_THRESHOLD;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Rising,
    Falling,
}

/// A detected transition of the input signal, stamped with the tick time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvent {
    pub kind: EdgeKind,
    pub at: Millis,
}

/// Thresholds the sampled input level into a boolean and reports
/// transitions. A single fixed threshold, no temporal filtering: levels
/// hovering around the threshold will produce spurious edges.
#[derive(Debug, Default)]
pub struct PulseDetector {
    high: bool,
}

impl PulseDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one level sample and returns the transition it caused, if any.
    pub fn sample(&mut self, level: f32, now: Millis) -> Option<EdgeEvent> {
        let high = level >= INPUT_THRESHOLD;
        let event = match (self.high, high) {
            (false, true) => Some(EdgeEvent {
                kind: EdgeKind::Rising,
                at: now,
            }),
            (true, false) => Some(EdgeEvent {
                kind: EdgeKind::Falling,
                at: now,
            }),
            _ => None,
        };
        self.high = high;
        if let Some(edge) = &event {
            trace!("Input edge {:?} at {} ms", edge.kind, edge.at);
        }
        event
    }

    /// Current thresholded state of the input, mirrored on the indicator
    /// line.
    pub fn is_high(&self) -> bool {
        self.high
    }
}
