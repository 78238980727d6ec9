pub mod buttons;
pub mod cli;
pub mod config;
pub mod console;
pub mod display;
pub mod driver;
pub mod engine;
pub mod logging;
pub mod port;
pub mod ui;

pub use engine::Engine;

use std::sync::{Arc, Mutex};

/// Engine shared between the tick driver and the inspector.
pub type SharedEngine = Arc<Mutex<Engine>>;

pub fn create_shared_engine() -> SharedEngine {
    Arc::new(Mutex::new(Engine::new()))
}

/// Shared engine with a deterministic humanize jitter source, for tests.
pub fn create_seeded_engine(seed: u64) -> SharedEngine {
    Arc::new(Mutex::new(Engine::with_seed(seed)))
}
