//! Shared library modules providing error types, settings paths, and telemetry initialization.

pub mod errors;
pub mod paths;
pub mod telemetry;
