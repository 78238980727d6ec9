use clap::Parser;
use groovesplitrs::{
    cli::Args,
    console, create_seeded_engine, create_shared_engine,
    driver::{Driver, DriverMessage, WallClock},
    port::{LogOutputBank, SimulatedClockInput},
    ui::Inspector,
    SharedEngine,
};
use std::sync::mpsc::{self, Sender};
use std::thread;
mod logging;

fn main() {
    initialize_logging();
    let args = parse_command_line_arguments();

    let engine = create_engine(&args);
    let clock = WallClock::new();
    let (message_tx, message_rx) = mpsc::channel();

    let driver_handle = start_tick_driver(&args, &engine, clock, message_rx);

    if !args.headless {
        start_inspector(&engine, clock);
    }

    run_command_prompt(message_tx);

    if driver_handle.join().is_err() {
        log::error!("Tick driver thread panicked");
    }
}

fn initialize_logging() {
    logging::init_logger().expect("Logger initialization failed");
    log::info!("Application starting");
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn create_engine(args: &Args) -> SharedEngine {
    match args.seed {
        Some(seed) => create_seeded_engine(seed),
        None => create_shared_engine(),
    }
}

fn start_tick_driver(
    args: &Args,
    engine: &SharedEngine,
    clock: WallClock,
    message_rx: std::sync::mpsc::Receiver<DriverMessage>,
) -> thread::JoinHandle<()> {
    let input = SimulatedClockInput::new(args.sim_bpm, args.sim_duty);
    let outputs = LogOutputBank::new();
    let driver = Driver::new(engine.clone(), input, outputs, None, message_rx, clock);
    thread::spawn(move || driver.run())
}

fn start_inspector(engine: &SharedEngine, clock: WallClock) {
    let inspector = Inspector::new(engine.clone(), clock);
    thread::spawn(move || inspector.run());
}

fn run_command_prompt(message_tx: Sender<DriverMessage>) {
    println!("\nClock utility running. Commands: n=select, d=divide, m=multiply, q=quit");
    console::run_command_prompt(message_tx);
}
