//! Cooperative tick driver
//!
//! Everything the engine does happens inside [`Driver::step`]: drain
//! pending commands, sample the buttons and the input level, advance the
//! engine one tick, push the line states out. [`Driver::run`] invokes it
//! in a tight loop against the wall clock; tests invoke it directly with
//! scripted timestamps. No preemption, no parallel engine access beyond
//! the shared lock.

use crate::buttons::ButtonBank;
use crate::engine::{Command, Millis};
use crate::port::{ControlPort, InputPort, OutputBank};
use crate::SharedEngine;
use log::info;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Messages accepted by the driver from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverMessage {
    Command(Command),
    Shutdown,
}

/// Monotonic millisecond clock shared by the driver and the inspector so
/// both read timestamps off the same zero-point.
#[derive(Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Driver<I: InputPort, O: OutputBank> {
    engine: SharedEngine,
    input: I,
    outputs: O,
    buttons: Option<(Box<dyn ControlPort>, ButtonBank)>,
    command_rx: Receiver<DriverMessage>,
    clock: WallClock,
}

impl<I: InputPort, O: OutputBank> Driver<I, O> {
    pub fn new(
        engine: SharedEngine,
        input: I,
        outputs: O,
        buttons: Option<Box<dyn ControlPort>>,
        command_rx: Receiver<DriverMessage>,
        clock: WallClock,
    ) -> Self {
        Self {
            engine,
            input,
            outputs,
            buttons: buttons.map(|port| (port, ButtonBank::new())),
            command_rx,
            clock,
        }
    }

    /// One tick of the whole device. Returns false once the driver should
    /// stop.
    pub fn step(&mut self, now: Millis) -> bool {
        let mut commands: Vec<Command> = Vec::new();

        if let Some((port, bank)) = self.buttons.as_mut() {
            commands.extend(bank.sample(port.levels(now), now));
        }

        loop {
            match self.command_rx.try_recv() {
                Ok(DriverMessage::Command(command)) => commands.push(command),
                Ok(DriverMessage::Shutdown) => {
                    info!("Shutdown message received");
                    return false;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("Command channel closed, stopping driver");
                    return false;
                }
            }
        }

        let level = self.input.level(now);
        if let Ok(mut engine) = self.engine.lock() {
            for command in commands {
                engine.apply(command);
            }
            engine.tick(level, now);

            for (idx, high) in engine.outputs().iter().enumerate() {
                self.outputs.set_output(idx, *high);
            }
            self.outputs.set_indicator(engine.input_high());
        }
        true
    }

    /// Runs the tick loop against the wall clock until shutdown.
    pub fn run(mut self) {
        info!("Tick driver started");
        loop {
            let now = self.clock.now_ms();
            if !self.step(now) {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        info!("Tick driver stopped");
    }

    /// The output bank, for inspection by the test harness.
    pub fn outputs(&self) -> &O {
        &self.outputs
    }
}
