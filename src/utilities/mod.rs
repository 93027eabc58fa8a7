pub mod config;
pub mod console;
pub mod elevator_status;
pub mod errors;
pub mod pending_calls;
pub mod report;
pub mod request;
pub mod sequence;
