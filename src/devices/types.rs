//! Common types for device categories: the device record and its active-hours rule.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::Serialize;

/// Hours in one simulated day.
pub const HOURS_PER_DAY: usize = 24;

/// Declarative rule deciding whether a device draws power at a given hour of day.
///
/// Every rule is evaluated by [`ActiveHours::is_active`], so device data stays
/// free of behavior and can be inspected or serialized directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveHours {
    /// Active at every hour.
    Always,
    /// Active when `start <= hour < end`.
    Window { start: usize, end: usize },
    /// Active when `hour < start` or `hour >= end`.
    Outside { start: usize, end: usize },
}

impl ActiveHours {
    /// Returns `true` if the rule allows consumption at `hour` (0–23).
    ///
    /// # Examples
    ///
    /// ```
    /// use waste_sim::devices::ActiveHours;
    ///
    /// let office = ActiveHours::Window { start: 8, end: 18 };
    /// assert!(office.is_active(8));
    /// assert!(!office.is_active(18));
    /// ```
    pub fn is_active(self, hour: usize) -> bool {
        match self {
            Self::Always => true,
            Self::Window { start, end } => (start..end).contains(&hour),
            Self::Outside { start, end } => hour < start || hour >= end,
        }
    }
}

/// An immutable device category with a Normal draw distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Device {
    /// Unique display name, used as the key in breakdowns and rankings.
    pub name: &'static str,
    /// Mean hourly draw (kWh).
    pub baseline_kwh: f64,
    /// Standard deviation of the hourly draw (kWh).
    pub variability_kwh: f64,
    /// Hours of the day in which the device consumes.
    pub active: ActiveHours,
}

impl Device {
    /// Whether the device consumes at `hour_of_day`.
    pub fn is_active(&self, hour_of_day: usize) -> bool {
        self.active.is_active(hour_of_day)
    }

    /// Draws one hourly consumption sample, clamped at zero.
    ///
    /// Samples `Normal(baseline_kwh, variability_kwh)` from the caller's
    /// random source; negative draws are clamped before they reach any sum.
    pub fn draw_kwh<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        (self.baseline_kwh + self.variability_kwh * z).max(0.0)
    }
}
