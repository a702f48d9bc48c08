pub mod athletes;
pub mod config;
pub mod error;
pub mod telemetry;
