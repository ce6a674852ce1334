//! Stochastic hourly consumption generator.
//!
//! Two independent passes sample the device catalog: the totals pass feeds
//! waste detection, the breakdown pass feeds attribution. They share no
//! draws, so their hourly sums differ, and only the totals pass carries
//! anomalous spikes.

use rand::Rng;

use crate::devices::{self, Device};

use super::clock::Clock;
use super::types::{BreakdownRecord, ConsumptionRecord, DeviceReading, SimConfig, TimePoint};

/// Probability that an hour of the totals pass carries an anomalous surge.
pub const SPIKE_PROBABILITY: f64 = 0.05;
/// Smallest anomalous surge (kWh).
pub const SPIKE_MIN_KWH: f64 = 5.0;
/// Largest anomalous surge, exclusive (kWh).
pub const SPIKE_MAX_KWH: f64 = 15.0;

/// Samples hourly consumption for a fixed device set.
///
/// Holds no random state: every call takes the caller's random source, so
/// runs are reproducible from a seed and safe to execute concurrently.
#[derive(Debug, Clone, Copy)]
pub struct ConsumptionSimulator {
    devices: &'static [Device],
}

impl Default for ConsumptionSimulator {
    fn default() -> Self {
        Self::new(devices::devices())
    }
}

impl ConsumptionSimulator {
    /// Creates a simulator over the given devices.
    pub fn new(devices: &'static [Device]) -> Self {
        Self { devices }
    }

    /// Devices sampled by this simulator.
    pub fn devices(&self) -> &'static [Device] {
        self.devices
    }

    /// Generates the hourly total-consumption series.
    ///
    /// For every hour, each active device contributes one clamped Normal
    /// draw; with probability [`SPIKE_PROBABILITY`] a uniform surge in
    /// `[SPIKE_MIN_KWH, SPIKE_MAX_KWH)` is added on top.
    ///
    /// # Returns
    ///
    /// Exactly `24 * days` records in ascending time order.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        config: &SimConfig,
        rng: &mut R,
    ) -> Vec<ConsumptionRecord> {
        let mut records = Vec::with_capacity(config.total_steps());
        Clock::for_config(config).run(|time| {
            let hour = time.hour_of_day();
            let mut total_kwh = 0.0;
            for device in self.devices.iter().filter(|d| d.is_active(hour)) {
                total_kwh += device.draw_kwh(rng);
            }
            if rng.random_bool(SPIKE_PROBABILITY) {
                total_kwh += rng.random_range(SPIKE_MIN_KWH..SPIKE_MAX_KWH);
            }
            records.push(ConsumptionRecord::new(time, total_kwh));
        });
        records
    }

    /// Generates the per-device breakdown series.
    ///
    /// Sampling runs device by device over the whole horizon; inactive
    /// hours read zero. No spike term is added.
    ///
    /// # Returns
    ///
    /// Exactly `24 * days` records in ascending time order, each holding one
    /// reading per device in catalog order.
    pub fn simulate_breakdown<R: Rng + ?Sized>(
        &self,
        config: &SimConfig,
        rng: &mut R,
    ) -> Vec<BreakdownRecord> {
        let times: Vec<TimePoint> = Clock::for_config(config).collect();

        // device-major sampling: columns[d][t]
        let columns: Vec<Vec<f64>> = self
            .devices
            .iter()
            .map(|device| {
                times
                    .iter()
                    .map(|t| {
                        if device.is_active(t.hour_of_day()) {
                            device.draw_kwh(rng)
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect();

        times
            .iter()
            .enumerate()
            .map(|(i, &time)| {
                let readings = self
                    .devices
                    .iter()
                    .zip(&columns)
                    .map(|(device, column)| DeviceReading {
                        device: device.name,
                        kwh: column[i],
                    })
                    .collect();
                BreakdownRecord::new(time, readings)
            })
            .collect()
    }
}
