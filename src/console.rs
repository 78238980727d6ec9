// console.rs
//
// Stands in for the panel buttons on desktop builds: reads commands from
// the terminal and forwards them to the tick driver.

use crate::driver::DriverMessage;
use crate::engine::Command;
use dialoguer::Input;
use log::{error, info};
use std::sync::mpsc::Sender;

/// Maps one line of console input to a driver message.
pub fn map_command_line(line: &str) -> Option<DriverMessage> {
    match line.trim().to_lowercase().as_str() {
        "n" | "next" => Some(DriverMessage::Command(Command::SelectNext)),
        "d" | "div" | "divide" => Some(DriverMessage::Command(Command::Divide)),
        "m" | "mul" | "multiply" => Some(DriverMessage::Command(Command::Multiply)),
        "q" | "quit" => Some(DriverMessage::Shutdown),
        _ => None,
    }
}

/// Prompt loop; returns once the user quits or the driver goes away.
pub fn run_command_prompt(message_tx: Sender<DriverMessage>) {
    info!("Command prompt started");
    loop {
        let line: String = match Input::new()
            .with_prompt("command [n/d/m/q]")
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                error!("Console input error: {}", e);
                break;
            }
        };

        match map_command_line(&line) {
            Some(DriverMessage::Shutdown) => {
                info!("Quit requested from console");
                let _ = message_tx.send(DriverMessage::Shutdown);
                break;
            }
            Some(message) => {
                if message_tx.send(message).is_err() {
                    break;
                }
            }
            None => println!("Unknown command: {}", line.trim()),
        }
    }
}
