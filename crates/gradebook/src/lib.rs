pub mod config;
pub mod error;
pub mod gpa;
pub mod import;
pub mod records;
pub mod telemetry;
pub mod transcript;
