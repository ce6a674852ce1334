//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use waste_sim::devices;
use waste_sim::sim::engine::{self, EngineOutput, RunParams, SimulatedSeries};
use waste_sim::sim::types::{BreakdownRecord, DeviceReading, SimConfig, TimePoint};

/// Seed used by fixtures unless a test needs another.
pub const SEED: u64 = 42;

/// Validated run parameters with a fixed seed.
pub fn params(days: usize, reduction_percent: f64, seed: u64) -> RunParams {
    RunParams::new(days, reduction_percent, Some(seed)).expect("fixture params should be valid")
}

/// Runs the engine end to end.
pub fn run(days: usize, reduction_percent: f64, seed: u64) -> EngineOutput {
    engine::run(&params(days, reduction_percent, seed)).expect("fixture run should succeed")
}

/// Both series for `(days, seed)` without applying a reduction.
pub fn simulated(days: usize, seed: u64) -> SimulatedSeries {
    let config = SimConfig::new(days, seed).expect("fixture config should be valid");
    engine::simulate(&config)
}

/// A breakdown hour where every device read zero.
pub fn zero_breakdown_hour(index: usize) -> BreakdownRecord {
    let readings = devices::devices()
        .iter()
        .map(|d| DeviceReading {
            device: d.name,
            kwh: 0.0,
        })
        .collect();
    BreakdownRecord::new(TimePoint::new(index), readings)
}
