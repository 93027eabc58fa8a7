use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unexpected parameter value without a parameter name: {0}")]
    ValueWithoutName(String),
    #[error("Unexpected dash without parameter type in command line arguments")]
    EmptyName,
    #[error("Unknown parameter {0}")]
    UnknownParameter(String),
    #[error("No value is specified for the {0}")]
    MissingValue(&'static str),
    #[error("Too many values are specified for the {0}")]
    TooManyValues(&'static str),
    #[error("Unexpected {what} value specified via the command line: {value}")]
    NotANumber { what: &'static str, value: String },
    #[error("The floor numbers value should be greater or equals {min} and not greater than {max}")]
    FloorCountOutOfRange { min: u8, max: u8 },
    #[error("Unexpected {what} value in the configuration file: {value}")]
    InvalidFileValue { what: &'static str, value: String },
    #[error("A single trip would take longer than {max_hours} hours; check floor height and speed")]
    TripTooLong { max_hours: u64 },
    #[error("The {0} must be greater than 0")]
    NotPositive(&'static str),
    #[error("The admission capacity must be greater than 0")]
    ZeroCapacity,
    #[error("Could not read configuration file {path}: {source}")]
    FileUnreadable { path: String, source: io::Error },
    #[error("Could not parse configuration file {path}: {source}")]
    FileMalformed { path: String, source: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("The input floor value '{0}' is too big")]
    FloorTooHigh(i64),
    #[error("The input floor value '{0}' cannot be less than 1")]
    FloorTooLow(i64),
    #[error("Too many commands to handle in queue. The command is not accepted")]
    Overloaded,
    #[error("The elevator is shut down. The command is not accepted")]
    Stopped,
}
