use std::sync::Arc;

use crossbeam_channel::select;
use log::debug;

use elevator::modules::io::{self, UserCommand};
use elevator::utilities::config::{self, Config};
use elevator::utilities::console::{self, Console};
use elevator::ElevatorController;

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // READ CONFIGURATION
    let settings = match Config::get() {
        Ok(settings) => settings,
        Err(e) => {
            let usage = config::usage();
            console::print_error(&e.to_string())?;
            console::print_lines(&usage[0], &usage[1..])?;
            return Ok(());
        },
    };
    console::print_lines("Starting the application with the following parameters:", &settings.describe())?;
    console::print_invitation(true)?;

    // START SIMULATION
    let controller = ElevatorController::start(settings, Arc::new(Console::new()))?;
    let elevator_status_rx = controller.elevator_status_rx();
    let user_command_rx = io::init()?;

    console::print_prompt()?;
    loop {
        select! {
            recv(user_command_rx) -> msg => {
                match msg {
                    Ok(UserCommand::Outside(floor)) => {
                        controller.call_outside(floor).ok();
                    },
                    Ok(UserCommand::Inside(floor)) => {
                        controller.call_inside(floor).ok();
                    },
                    Ok(UserCommand::Invalid(line)) => {
                        console::print_error(&format!("Unexpected command: {}", line))?;
                        console::print_invitation(false)?;
                    },
                    Ok(UserCommand::Quit) | Err(_) => break,
                }
                console::print_prompt()?;
            },
            recv(elevator_status_rx) -> msg => {
                if let Ok(status) = msg {
                    debug!("status: floor {} {} pending {:?}",
                        status.floor, status.behaviour.as_string(), status.pending_floors);
                }
            },
        }
    }

    println!("STOPPING PROGRAM...");
    controller.shutdown();
    Ok(())
}
