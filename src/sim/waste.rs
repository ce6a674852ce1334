//! Threshold-based waste detection and reduction-policy evaluation.

use std::fmt;

use serde::Serialize;

use super::types::{
    AdjustedRecord, CO2_KG_PER_KWH, ConsumptionRecord, ReductionPercent, TARIFF_PER_KWH,
    THRESHOLD_KWH,
};

/// Outcome of applying a reduction policy to a consumption series.
///
/// Computed post-hoc from `&[ConsumptionRecord]`; the economic and CO₂
/// figures are linear in `reduced_kwh`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteReport {
    /// Applied reduction.
    pub reduction_percent: ReductionPercent,
    /// Sum of every hour's consumption above the threshold (kWh).
    pub total_excess_kwh: f64,
    /// Share of the excess removed by the policy (kWh).
    pub reduced_kwh: f64,
    /// `reduced_kwh * TARIFF_PER_KWH`.
    pub savings_currency: f64,
    /// `reduced_kwh * CO2_KG_PER_KWH` (kg).
    pub co2_avoided_kg: f64,
    /// Input series with excess and adjusted consumption per hour.
    pub adjusted: Vec<AdjustedRecord>,
}

impl WasteReport {
    /// Evaluates `reduction` against a consumption series.
    ///
    /// Each waste hour is lowered by `excess * fraction` but never below the
    /// threshold; hours at or under the threshold pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use waste_sim::sim::types::{ConsumptionRecord, ReductionPercent, TimePoint};
    /// use waste_sim::sim::waste::WasteReport;
    ///
    /// let records = [ConsumptionRecord::new(TimePoint::new(0), 20.0)];
    /// let half = ReductionPercent::new(50.0).unwrap();
    /// let report = WasteReport::evaluate(&records, half);
    /// assert_eq!(report.total_excess_kwh, 8.0);
    /// assert_eq!(report.adjusted[0].adjusted_kwh, 16.0);
    /// ```
    pub fn evaluate(records: &[ConsumptionRecord], reduction: ReductionPercent) -> Self {
        let fraction = reduction.fraction();

        let adjusted: Vec<AdjustedRecord> = records
            .iter()
            .map(|r| {
                let excess_kwh = r.excess_kwh();
                let removed = excess_kwh * fraction;
                let adjusted_kwh = if !r.is_waste {
                    r.total_kwh
                } else if removed >= excess_kwh {
                    // all excess removed: exactly on the threshold, free of rounding
                    THRESHOLD_KWH
                } else {
                    (r.total_kwh - removed).max(THRESHOLD_KWH)
                };
                AdjustedRecord {
                    time: r.time,
                    total_kwh: r.total_kwh,
                    is_waste: r.is_waste,
                    excess_kwh,
                    adjusted_kwh,
                }
            })
            .collect();

        let total_excess_kwh: f64 = adjusted.iter().map(|r| r.excess_kwh).sum();
        let reduced_kwh = total_excess_kwh * fraction;

        Self {
            reduction_percent: reduction,
            total_excess_kwh,
            reduced_kwh,
            savings_currency: reduced_kwh * TARIFF_PER_KWH,
            co2_avoided_kg: reduced_kwh * CO2_KG_PER_KWH,
            adjusted,
        }
    }

    /// Hours whose original consumption exceeded the threshold.
    pub fn waste_hours(&self) -> impl Iterator<Item = &AdjustedRecord> {
        self.adjusted.iter().filter(|r| r.is_waste)
    }

    /// Number of waste hours.
    pub fn waste_hour_count(&self) -> usize {
        self.waste_hours().count()
    }
}

impl fmt::Display for WasteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Waste Report ---")?;
        writeln!(f, "Total waste:      {:.2} kWh", self.total_excess_kwh)?;
        writeln!(f, "Reduction:        {:.2} kWh", self.reduced_kwh)?;
        writeln!(f, "Savings:          {:.2}", self.savings_currency)?;
        writeln!(f, "CO2 avoided:      {:.2} kg", self.co2_avoided_kg)?;
        write!(
            f,
            "Waste hours:      {} of {}",
            self.waste_hour_count(),
            self.adjusted.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::TimePoint;

    fn series(totals: &[f64]) -> Vec<ConsumptionRecord> {
        totals
            .iter()
            .enumerate()
            .map(|(i, &kwh)| ConsumptionRecord::new(TimePoint::new(i), kwh))
            .collect()
    }

    fn pct(p: f64) -> ReductionPercent {
        ReductionPercent::new(p).unwrap_or(ReductionPercent::ZERO)
    }

    #[test]
    fn twenty_kwh_at_half_reduction() {
        let report = WasteReport::evaluate(&series(&[20.0]), pct(50.0));
        let r = &report.adjusted[0];
        assert_eq!(r.excess_kwh, 8.0);
        assert_eq!(r.adjusted_kwh, 16.0);
        assert_eq!(report.reduced_kwh, 4.0);
    }

    #[test]
    fn totals_and_linear_savings() {
        // excess: 0 + 3 + 0 + 10
        let report = WasteReport::evaluate(&series(&[5.0, 15.0, 12.0, 22.0]), pct(40.0));
        assert_eq!(report.total_excess_kwh, 13.0);
        assert!((report.reduced_kwh - 5.2).abs() < 1e-12);
        assert_eq!(report.savings_currency, report.reduced_kwh * 0.90);
        assert_eq!(report.co2_avoided_kg, report.reduced_kwh * 0.07);
        assert_eq!(report.waste_hour_count(), 2);
    }

    #[test]
    fn zero_reduction_leaves_series_unchanged() {
        let report = WasteReport::evaluate(&series(&[3.0, 13.0, 25.5]), ReductionPercent::ZERO);
        assert_eq!(report.reduced_kwh, 0.0);
        assert_eq!(report.savings_currency, 0.0);
        for r in &report.adjusted {
            assert_eq!(r.adjusted_kwh, r.total_kwh);
        }
    }

    #[test]
    fn full_reduction_lands_on_threshold() {
        let report = WasteReport::evaluate(&series(&[3.0, 13.0, 25.5]), ReductionPercent::FULL);
        for r in &report.adjusted {
            if r.is_waste {
                assert_eq!(r.adjusted_kwh, THRESHOLD_KWH);
            } else {
                assert_eq!(r.adjusted_kwh, r.total_kwh);
            }
        }
    }

    #[test]
    fn savings_monotonic_in_reduction() {
        let records = series(&[14.0, 9.0, 30.0, 12.5]);
        let mut previous = WasteReport::evaluate(&records, ReductionPercent::ZERO);
        for p in (5..=100).step_by(5) {
            let next = WasteReport::evaluate(&records, pct(f64::from(p)));
            assert!(next.reduced_kwh >= previous.reduced_kwh);
            assert!(next.savings_currency >= previous.savings_currency);
            assert!(next.co2_avoided_kg >= previous.co2_avoided_kg);
            previous = next;
        }
    }

    #[test]
    fn empty_series() {
        let report = WasteReport::evaluate(&[], pct(50.0));
        assert_eq!(report.total_excess_kwh, 0.0);
        assert!(report.adjusted.is_empty());
    }

    #[test]
    fn display_lists_metrics() {
        let report = WasteReport::evaluate(&series(&[20.0]), pct(50.0));
        let s = report.to_string();
        assert!(s.contains("Total waste:      8.00 kWh"));
        assert!(s.contains("CO2 avoided:"));
    }
}
