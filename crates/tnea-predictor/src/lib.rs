pub mod config;
pub mod counseling;
pub mod error;
pub mod import;
pub mod telemetry;
