//! Telemetry bootstrap shared by the coalesce binaries and test suites.

pub mod tracing;
