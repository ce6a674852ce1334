//! Per-device waste attribution and peak-hour aggregation.

use std::fmt;

use serde::Serialize;

use crate::devices::HOURS_PER_DAY;

use super::types::{BreakdownRecord, ImpactEntry, PeakHourEntry};

/// Ranked waste contributions by device and by hour of day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionReport {
    /// One entry per device, descending by attributed excess.
    pub by_device: Vec<ImpactEntry>,
    /// One entry per hour of day (0–23), descending by summed excess.
    pub by_hour: Vec<PeakHourEntry>,
}

impl AttributionReport {
    /// Attributes each hour's breakdown excess across devices.
    ///
    /// Every hour's excess, `max(total - threshold, 0)` of the breakdown
    /// total, is split in proportion to each device's share of that total.
    /// A zero-total hour contributes nothing to any device.
    ///
    /// Ties keep input order: catalog order for devices, ascending hour for
    /// the peak-hour table.
    pub fn attribute(breakdown: &[BreakdownRecord]) -> Self {
        let mut by_device: Vec<ImpactEntry> = Vec::new();
        let mut by_hour: Vec<PeakHourEntry> = (0..HOURS_PER_DAY)
            .map(|hour_of_day| PeakHourEntry {
                hour_of_day,
                excess_kwh: 0.0,
            })
            .collect();

        for record in breakdown {
            let hour_excess = record.excess_kwh();
            by_hour[record.time.hour_of_day()].excess_kwh += hour_excess;

            for reading in &record.per_device {
                let share = device_share(reading.kwh, record.total_kwh, hour_excess);
                match by_device.iter_mut().find(|e| e.device == reading.device) {
                    Some(entry) => entry.excess_kwh += share,
                    None => by_device.push(ImpactEntry {
                        device: reading.device,
                        excess_kwh: share,
                    }),
                }
            }
        }

        by_device.sort_by(|a, b| b.excess_kwh.total_cmp(&a.excess_kwh));
        by_hour.sort_by(|a, b| b.excess_kwh.total_cmp(&a.excess_kwh));

        Self {
            by_device,
            by_hour,
        }
    }

    /// Excess attributed across all devices (kWh).
    pub fn total_excess_kwh(&self) -> f64 {
        self.by_device.iter().map(|e| e.excess_kwh).sum()
    }

    /// The device with the largest attributed excess, if any excess exists.
    pub fn top_device(&self) -> Option<&ImpactEntry> {
        self.by_device.first().filter(|e| e.excess_kwh > 0.0)
    }
}

/// Portion of `hour_excess` attributed to a device drawing `device_kwh`.
///
/// Defined as zero when the hour's total is zero.
pub fn device_share(device_kwh: f64, total_kwh: f64, hour_excess: f64) -> f64 {
    if total_kwh > 0.0 {
        device_kwh / total_kwh * hour_excess
    } else {
        0.0
    }
}

impl fmt::Display for AttributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Waste by Device ---")?;
        for e in &self.by_device {
            writeln!(f, "{:<22} {:>8.2} kWh", e.device, e.excess_kwh)?;
        }
        writeln!(f, "--- Peak Hours ---")?;
        for (i, e) in self.by_hour.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:02}:00                  {:>8.2} kWh", e.hour_of_day, e.excess_kwh)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::{DeviceReading, TimePoint};

    fn record(index: usize, readings: &[(&'static str, f64)]) -> BreakdownRecord {
        BreakdownRecord::new(
            TimePoint::new(index),
            readings
                .iter()
                .map(|&(device, kwh)| DeviceReading { device, kwh })
                .collect(),
        )
    }

    #[test]
    fn excess_split_proportionally() {
        // total 16 → excess 4; machines hold 3/4 of the draw
        let breakdown = vec![record(15, &[("Machines", 12.0), ("Lighting", 4.0)])];
        let report = AttributionReport::attribute(&breakdown);
        assert_eq!(report.by_device[0].device, "Machines");
        assert_eq!(report.by_device[0].excess_kwh, 3.0);
        assert_eq!(report.by_device[1].excess_kwh, 1.0);
    }

    #[test]
    fn zero_total_hour_yields_zero_shares() {
        let breakdown = vec![record(0, &[("Lighting", 0.0), ("Servers", 0.0)])];
        let report = AttributionReport::attribute(&breakdown);
        assert_eq!(report.by_device.len(), 2);
        for e in &report.by_device {
            assert_eq!(e.excess_kwh, 0.0);
            assert!(!e.excess_kwh.is_nan());
        }
        assert!(report.top_device().is_none());
    }

    #[test]
    fn device_share_guards_division() {
        assert_eq!(device_share(0.0, 0.0, 5.0), 0.0);
        assert_eq!(device_share(2.0, 8.0, 4.0), 1.0);
    }

    #[test]
    fn hours_fold_across_days() {
        let breakdown = vec![
            record(14, &[("Machines", 15.0)]),
            record(24 + 14, &[("Machines", 13.0)]),
            record(3, &[("Machines", 14.0)]),
        ];
        let report = AttributionReport::attribute(&breakdown);
        assert_eq!(report.by_hour.len(), 24);
        assert_eq!(report.by_hour[0].hour_of_day, 14);
        assert_eq!(report.by_hour[0].excess_kwh, 4.0);
        assert_eq!(report.by_hour[1].hour_of_day, 3);
        assert_eq!(report.by_hour[1].excess_kwh, 2.0);
        // remaining hours keep ascending order at zero
        assert_eq!(report.by_hour[2].hour_of_day, 0);
    }

    #[test]
    fn attribution_sum_matches_hourly_excess() {
        let breakdown = vec![
            record(0, &[("A", 7.0), ("B", 6.5), ("C", 0.3)]),
            record(1, &[("A", 2.0), ("B", 1.0), ("C", 0.0)]),
            record(2, &[("A", 9.1), ("B", 4.4), ("C", 3.3)]),
        ];
        let hourly: f64 = breakdown.iter().map(BreakdownRecord::excess_kwh).sum();
        let report = AttributionReport::attribute(&breakdown);
        assert!((report.total_excess_kwh() - hourly).abs() < 1e-9);
        let by_hour: f64 = report.by_hour.iter().map(|e| e.excess_kwh).sum();
        assert!((by_hour - hourly).abs() < 1e-9);
    }

    #[test]
    fn rankings_are_descending() {
        let breakdown = vec![
            record(8, &[("A", 1.0), ("B", 9.0), ("C", 5.0)]),
            record(9, &[("A", 6.0), ("B", 2.0), ("C", 8.0)]),
        ];
        let report = AttributionReport::attribute(&breakdown);
        assert!(
            report
                .by_device
                .windows(2)
                .all(|w| w[0].excess_kwh >= w[1].excess_kwh)
        );
        assert!(
            report
                .by_hour
                .windows(2)
                .all(|w| w[0].excess_kwh >= w[1].excess_kwh)
        );
    }

    #[test]
    fn empty_breakdown() {
        let report = AttributionReport::attribute(&[]);
        assert!(report.by_device.is_empty());
        assert_eq!(report.by_hour.len(), 24);
        assert_eq!(report.total_excess_kwh(), 0.0);
    }
}
