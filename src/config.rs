// config.rs
//
// Fixed operating constants for the clock engine. None of these are
// user-configurable at runtime; they mirror the hardware build.

/// Number of derived trigger outputs.
pub const NUM_CHANNELS: usize = 6;

/// Fraction of full scale at or above which the input signal reads high.
/// No hysteresis is applied around this threshold.
pub const INPUT_THRESHOLD: f32 = 0.4;

/// How long a division-mode output stays asserted, in milliseconds.
/// Independent of tempo.
pub const DIVISION_PULSE_WIDTH_MS: u64 = 20;

/// Groove pulses are held five times longer than division pulses so that
/// downstream gear can catch the narrower timing windows.
pub const GROOVE_PULSE_WIDTH_MS: u64 = DIVISION_PULSE_WIDTH_MS * 5;

/// Groove generation is suspended once no master edge has arrived for this
/// long.
pub const GROOVE_TIMEOUT_MS: u64 = 2000;

/// The tempo readout reverts to a placeholder after this long without a
/// master edge.
pub const DISPLAY_STALE_MS: u64 = 3000;

/// Tempi at or below this are treated as implausible and never overwrite
/// the last valid estimate.
pub const MIN_PLAUSIBLE_BPM: f64 = 30.0;

/// Largest clock division factor reachable through the divide command.
pub const MAX_RATIO: i32 = 64;

/// Hold-off between accepted button state changes.
pub const DEBOUNCE_MS: u64 = 50;
