/// Waste attribution by device and by hour of day.
pub mod attribution;
/// Hourly simulation clock.
pub mod clock;
pub mod engine;
/// Stochastic consumption generator.
pub mod simulator;
pub mod types;
pub mod waste;
