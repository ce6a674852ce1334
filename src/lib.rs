//! Hourly energy-waste simulator with reduction-policy and attribution analysis.

#[cfg(feature = "api")]
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
/// Simulation engine, waste calculation, and attribution modules.
pub mod sim;
pub mod telemetry;
#[cfg(feature = "tui")]
pub mod tui;
