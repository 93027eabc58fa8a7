pub mod modules;
pub mod utilities;

pub use modules::ElevatorController;
pub use modules::dispatcher::{Dispatcher, Schedule};
pub use utilities::config::{Config, ElevatorSettings};
pub use utilities::errors::{AdmissionError, ConfigError};
pub use utilities::report::{OutputSink, Report};
pub use utilities::request::{Request, RequestKind};
