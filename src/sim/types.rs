//! Core simulation types: configuration, time points, and per-hour records.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Serialize, Serializer};

use crate::devices::HOURS_PER_DAY;
use crate::error::EngineError;

/// Hourly consumption above which an hour counts as waste (kWh).
pub const THRESHOLD_KWH: f64 = 12.0;
/// Energy tariff applied to avoided consumption (currency per kWh).
pub const TARIFF_PER_KWH: f64 = 0.90;
/// Emission factor applied to avoided consumption (kg CO₂ per kWh).
pub const CO2_KG_PER_KWH: f64 = 0.07;
/// Smallest simulated horizon (days).
pub const MIN_DAYS: usize = 1;
/// Largest simulated horizon (days).
pub const MAX_DAYS: usize = 30;

/// Portion of `kwh` above [`THRESHOLD_KWH`], never negative.
pub fn excess_over_threshold(kwh: f64) -> f64 {
    (kwh - THRESHOLD_KWH).max(0.0)
}

/// Validated simulation horizon and random seed.
///
/// # Examples
///
/// ```
/// use waste_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(2, 42).unwrap();
/// assert_eq!(cfg.total_steps(), 48);
/// assert!(SimConfig::new(0, 42).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SimConfig {
    days: usize,
    seed: u64,
}

impl SimConfig {
    /// Creates a configuration, rejecting horizons outside `[1, 30]` days.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for `days` out of range.
    pub fn new(days: usize, seed: u64) -> Result<Self, EngineError> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
            return Err(EngineError::invalid(
                "days",
                format!("must be in [{MIN_DAYS}, {MAX_DAYS}], got {days}"),
            ));
        }
        Ok(Self { days, seed })
    }

    /// Number of days to simulate, in `[1, 30]`.
    pub fn days(&self) -> usize {
        self.days
    }

    /// Seed of the run's random sources.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total number of hourly time points across all days.
    pub fn total_steps(&self) -> usize {
        HOURS_PER_DAY * self.days
    }
}

/// Share of the excess that the reduction policy removes, in percent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ReductionPercent(f64);

impl ReductionPercent {
    /// No reduction.
    pub const ZERO: Self = Self(0.0);
    /// Full reduction: every waste hour is brought down to the threshold.
    pub const FULL: Self = Self(100.0);

    /// Validates a percentage in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for values outside the
    /// range or non-finite values.
    pub fn new(percent: f64) -> Result<Self, EngineError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(EngineError::invalid(
                "reduction_percent",
                format!("must be in [0, 100], got {percent}"),
            ));
        }
        Ok(Self(percent))
    }

    /// The percentage value.
    pub fn percent(self) -> f64 {
        self.0
    }

    /// The percentage as a fraction in `[0, 1]`.
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl fmt::Display for ReductionPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Start of every simulated horizon: 2025-01-01 00:00.
pub fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
}

/// An hourly time point, counted from [`origin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint {
    index: usize,
}

impl TimePoint {
    /// Time point `index` hours after the origin.
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Hours elapsed since the origin.
    pub fn index(self) -> usize {
        self.index
    }

    /// Hour of day (0–23).
    pub fn hour_of_day(self) -> usize {
        self.index % HOURS_PER_DAY
    }

    /// Wall-clock timestamp of this time point.
    pub fn timestamp(self) -> NaiveDateTime {
        let hours = i64::try_from(self.index).unwrap_or(i64::MAX);
        origin() + TimeDelta::hours(hours)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timestamp().format("%Y-%m-%d %H:%M:%S"))
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Total consumption of one hour, as produced by the totals pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsumptionRecord {
    /// Hour this record covers.
    #[serde(rename = "timestamp")]
    pub time: TimePoint,
    /// Summed consumption including any anomalous spike (kWh, >= 0).
    pub total_kwh: f64,
    /// `total_kwh > THRESHOLD_KWH`.
    pub is_waste: bool,
}

impl ConsumptionRecord {
    /// Builds a record and classifies it against the threshold.
    pub fn new(time: TimePoint, total_kwh: f64) -> Self {
        Self {
            time,
            total_kwh,
            is_waste: total_kwh > THRESHOLD_KWH,
        }
    }

    /// Consumption above the threshold (kWh).
    pub fn excess_kwh(&self) -> f64 {
        excess_over_threshold(self.total_kwh)
    }
}

/// One device's draw within a breakdown hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceReading {
    /// Catalog device name.
    pub device: &'static str,
    /// Draw for the hour (kWh, >= 0; zero when inactive).
    pub kwh: f64,
}

/// Per-device consumption of one hour, as produced by the breakdown pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRecord {
    /// Hour this record covers.
    #[serde(rename = "timestamp")]
    pub time: TimePoint,
    /// One reading per catalog device, in catalog order.
    pub per_device: Vec<DeviceReading>,
    /// Sum of `per_device` (kWh).
    pub total_kwh: f64,
}

impl BreakdownRecord {
    /// Builds a record, summing the readings into `total_kwh`.
    pub fn new(time: TimePoint, per_device: Vec<DeviceReading>) -> Self {
        let total_kwh = per_device.iter().map(|r| r.kwh).sum();
        Self {
            time,
            per_device,
            total_kwh,
        }
    }

    /// Breakdown total above the threshold (kWh).
    pub fn excess_kwh(&self) -> f64 {
        excess_over_threshold(self.total_kwh)
    }
}

/// A consumption record after applying the reduction policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustedRecord {
    /// Hour this record covers.
    #[serde(rename = "timestamp")]
    pub time: TimePoint,
    /// Original consumption (kWh).
    pub total_kwh: f64,
    /// Whether the original consumption exceeded the threshold.
    pub is_waste: bool,
    /// `max(total_kwh - THRESHOLD_KWH, 0)`.
    pub excess_kwh: f64,
    /// Consumption after removing the reduced share of the excess (kWh).
    pub adjusted_kwh: f64,
}

impl fmt::Display for AdjustedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | total={:>6.2} kWh  excess={:>6.2} kWh  adjusted={:>6.2} kWh{}",
            self.time,
            self.total_kwh,
            self.excess_kwh,
            self.adjusted_kwh,
            if self.is_waste { "  [waste]" } else { "" },
        )
    }
}

/// Excess attributed to one device over the whole horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactEntry {
    /// Catalog device name.
    pub device: &'static str,
    /// Attributed excess (kWh, >= 0).
    pub excess_kwh: f64,
}

/// Excess summed over every day for one hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakHourEntry {
    /// Hour of day (0–23).
    pub hour_of_day: usize,
    /// Summed excess (kWh, >= 0).
    pub excess_kwh: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_config_bounds() {
        assert!(SimConfig::new(1, 0).is_ok());
        assert!(SimConfig::new(30, 0).is_ok());
        let err = SimConfig::new(31, 0).err();
        assert_eq!(err.map(|e| e.field()), Some("days"));
        assert!(SimConfig::new(0, 0).is_err());
        let cfg = SimConfig::new(2, 9).map(|c| (c.days(), c.seed()));
        assert_eq!(cfg, Ok((2, 9)));
    }

    #[test]
    fn sim_config_total_steps() {
        assert_eq!(SimConfig::new(1, 0).map(|c| c.total_steps()), Ok(24));
        assert_eq!(SimConfig::new(30, 0).map(|c| c.total_steps()), Ok(720));
    }

    #[test]
    fn reduction_percent_bounds() {
        assert!(ReductionPercent::new(0.0).is_ok());
        assert!(ReductionPercent::new(100.0).is_ok());
        assert!(ReductionPercent::new(-0.5).is_err());
        assert!(ReductionPercent::new(100.5).is_err());
        assert!(ReductionPercent::new(f64::NAN).is_err());
        assert_eq!(ReductionPercent::new(50.0).map(|r| r.fraction()), Ok(0.5));
    }

    #[test]
    fn time_point_calendar() {
        let t = TimePoint::new(49);
        assert_eq!(t.hour_of_day(), 1);
        assert_eq!(t.to_string(), "2025-01-03 01:00:00");
        assert_eq!(TimePoint::new(0).to_string(), "2025-01-01 00:00:00");
    }

    #[test]
    fn consumption_record_classification() {
        let at = ConsumptionRecord::new(TimePoint::new(0), 12.0);
        assert!(!at.is_waste);
        assert_eq!(at.excess_kwh(), 0.0);

        let above = ConsumptionRecord::new(TimePoint::new(0), 20.0);
        assert!(above.is_waste);
        assert_eq!(above.excess_kwh(), 8.0);
    }

    #[test]
    fn breakdown_record_sums_devices() {
        let rec = BreakdownRecord::new(
            TimePoint::new(3),
            vec![
                DeviceReading {
                    device: "Lighting",
                    kwh: 1.5,
                },
                DeviceReading {
                    device: "Servers",
                    kwh: 2.5,
                },
            ],
        );
        assert_eq!(rec.total_kwh, 4.0);
        assert_eq!(rec.per_device[1].kwh, 2.5);
        assert_eq!(rec.excess_kwh(), 0.0);
    }

    #[test]
    fn adjusted_record_display_does_not_panic() {
        let r = AdjustedRecord {
            time: TimePoint::new(5),
            total_kwh: 20.0,
            is_waste: true,
            excess_kwh: 8.0,
            adjusted_kwh: 16.0,
        };
        let s = format!("{r}");
        assert!(s.contains("[waste]"));
    }
}
