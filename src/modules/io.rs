/// ----- I/O MODULE -----
/// This module reads commands typed on the console and hands them to the
/// main loop over a channel.

use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use log::{debug, info};

const STOP_COMMAND: &str = "quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Outside(i64),
    Inside(i64),
    Quit,
    Invalid(String),
}

/// Parses one console line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line == STOP_COMMAND {
        return Some(UserCommand::Quit);
    }

    let mut chars = line.chars();
    let origin = chars.next().map(|c| c.to_ascii_lowercase());
    let floor = chars.as_str().trim().parse::<i64>().ok();

    Some(match (origin, floor) {
        (Some('o'), Some(floor)) => UserCommand::Outside(floor),
        (Some('i'), Some(floor)) => UserCommand::Inside(floor),
        _ => UserCommand::Invalid(line.to_string()),
    })
}

pub fn init() -> io::Result<Receiver<UserCommand>> {
    let (user_command_tx, user_command_rx) = unbounded();
    thread::Builder::new().name("console_input".to_string()).spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    info!("console input failed: {}", e);
                    break;
                },
            };
            if let Some(command) = parse_command(&line) {
                if user_command_tx.send(command).is_err() {
                    return;
                }
            }
        }
        debug!("console input closed");
        user_command_tx.send(UserCommand::Quit).ok();
    })?;
    Ok(user_command_rx)
}
