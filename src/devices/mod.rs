//! Device categories and their consumption profiles.

/// Fixed registry of simulated device categories.
pub mod catalog;
pub mod types;

// Re-export the main types for convenience
pub use catalog::{devices, find};
pub use types::{ActiveHours, Device, HOURS_PER_DAY};
