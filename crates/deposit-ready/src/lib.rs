//! Security deposit deadline and dispute calculators with an HTTP surface.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
