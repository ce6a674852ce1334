//! Dashboard application state.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::cache::SimulationCache;
use crate::config::ScenarioConfig;
use crate::error::EngineError;
use crate::io::export::{self, DEFAULT_FILE_NAME};
use crate::sim::engine::{self, EngineOutput};
use crate::sim::types::{MAX_DAYS, MIN_DAYS, ReductionPercent, SimConfig};

/// Reduction change per key press, in percent.
const REDUCTION_STEP: f64 = 5.0;

/// TUI application state.
///
/// Every input change re-evaluates through the cache: moving the reduction
/// reuses the cached series, moving the horizon or reseeding simulates once
/// per new `(days, seed)` pair.
pub struct App {
    cache: SimulationCache,
    /// Simulated days.
    pub days: usize,
    /// Applied reduction.
    pub reduction: ReductionPercent,
    /// Seed of the displayed series.
    pub seed: u64,
    /// Latest engine output.
    pub output: EngineOutput,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Last action feedback shown in the footer.
    pub status: String,
    /// Where `export` writes.
    pub export_path: PathBuf,
}

impl App {
    /// Creates the app from a validated scenario.
    ///
    /// An unseeded scenario gets a fresh seed; out-of-range values are
    /// clamped into the dashboard's input ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if the first evaluation
    /// is rejected.
    pub fn new(scenario: &ScenarioConfig) -> Result<Self, EngineError> {
        let sim = &scenario.simulation;
        let days = sim.days.clamp(MIN_DAYS, MAX_DAYS);
        let reduction = ReductionPercent::new(sim.reduction_percent.clamp(0.0, 100.0))
            .unwrap_or(ReductionPercent::ZERO);
        let seed = sim.seed.unwrap_or_else(|| rand::rng().random());
        let mut cache = SimulationCache::new(scenario.cache.capacity);
        let output = evaluate(&mut cache, days, seed, reduction)?;

        Ok(Self {
            cache,
            days,
            reduction,
            seed,
            output,
            quit: false,
            status: String::new(),
            export_path: PathBuf::from(DEFAULT_FILE_NAME),
        })
    }

    /// Re-evaluates the current inputs. A rejected input keeps the last output.
    fn refresh(&mut self) {
        match evaluate(&mut self.cache, self.days, self.seed, self.reduction) {
            Ok(output) => self.output = output,
            Err(e) => self.status = format!("Evaluation failed: {e}"),
        }
    }

    /// Lengthens the horizon by one day (up to 30).
    pub fn days_up(&mut self) {
        if self.days < MAX_DAYS {
            self.days += 1;
            self.refresh();
        }
    }

    /// Shortens the horizon by one day (down to 1).
    pub fn days_down(&mut self) {
        if self.days > MIN_DAYS {
            self.days -= 1;
            self.refresh();
        }
    }

    /// Raises the reduction by one step, capped at 100%.
    pub fn reduction_up(&mut self) {
        self.set_reduction(self.reduction.percent() + REDUCTION_STEP);
    }

    /// Lowers the reduction by one step, floored at 0%.
    pub fn reduction_down(&mut self) {
        self.set_reduction(self.reduction.percent() - REDUCTION_STEP);
    }

    fn set_reduction(&mut self, percent: f64) {
        if let Ok(reduction) = ReductionPercent::new(percent.clamp(0.0, 100.0)) {
            if reduction != self.reduction {
                self.reduction = reduction;
                self.refresh();
            }
        }
    }

    /// Draws a new seed and simulates it.
    pub fn reseed(&mut self) {
        self.seed = rand::rng().random();
        self.refresh();
        self.status = format!("New seed {}", self.seed);
    }

    /// Drops every cached series. The displayed output stays as is.
    pub fn clear_cache(&mut self) {
        let cleared = self.cache.len();
        self.cache.clear();
        self.status = format!("Cache cleared ({cleared} series)");
    }

    /// Writes the displayed series to [`App::export_path`].
    pub fn export(&mut self) {
        let path = self.export_path.clone();
        let rows = self.output.series().len();
        self.status = match export::export_csv(self.output.series(), &path) {
            Ok(()) => format!("Exported {rows} rows to {}", path.display()),
            Err(e) => format!("Export failed: {e}"),
        };
    }

    /// Number of cached series.
    pub fn cached_series(&self) -> usize {
        self.cache.len()
    }

    /// Most series the cache holds before evicting.
    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Redirects exports, e.g. into a scratch directory.
    pub fn set_export_path(&mut self, path: &Path) {
        self.export_path = path.to_path_buf();
    }
}

fn evaluate(
    cache: &mut SimulationCache,
    days: usize,
    seed: u64,
    reduction: ReductionPercent,
) -> Result<EngineOutput, EngineError> {
    let config = SimConfig::new(days, seed)?;
    let series = cache.get_or_simulate(&config);
    Ok(engine::evaluate(&series, reduction))
}
