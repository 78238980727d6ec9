//! Debounce state machines for the panel buttons
//!
//! Each button is a small, identical state machine: last accepted level
//! plus the time it changed. Transitions inside the hold-off are dropped.
//! Debounced presses become engine commands; the buttons never touch
//! engine state directly.

use crate::config::DEBOUNCE_MS;
use crate::engine::{Command, Millis};
use log::debug;

/// Single-button debouncer. The first observed transition is always
/// accepted; the hold-off only applies between transitions.
#[derive(Debug, Default)]
pub struct Debouncer {
    pressed: bool,
    last_change: Option<Millis>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw level sample; returns true when a debounced press is
    /// registered.
    pub fn sample(&mut self, pressed: bool, now: Millis) -> bool {
        if pressed == self.pressed {
            return false;
        }
        if let Some(last_change) = self.last_change {
            if now.saturating_sub(last_change) < DEBOUNCE_MS {
                // Still settling from the previous transition.
                return false;
            }
        }
        self.pressed = pressed;
        self.last_change = Some(now);
        pressed
    }
}

/// The three panel buttons, debounced identically and mapped to commands.
#[derive(Debug, Default)]
pub struct ButtonBank {
    select: Debouncer,
    divide: Debouncer,
    multiply: Debouncer,
}

impl ButtonBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample of the three raw button levels (select, divide,
    /// multiply) and returns any commands issued by debounced presses.
    pub fn sample(&mut self, levels: [bool; 3], now: Millis) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.select.sample(levels[0], now) {
            commands.push(Command::SelectNext);
        }
        if self.divide.sample(levels[1], now) {
            commands.push(Command::Divide);
        }
        if self.multiply.sample(levels[2], now) {
            commands.push(Command::Multiply);
        }
        if !commands.is_empty() {
            debug!("Button commands at {} ms: {:?}", now, commands);
        }
        commands
    }
}
