//! Caller-owned cache of simulated series keyed by `(days, seed)`.
//!
//! The engine itself never caches. Front ends that re-evaluate the same
//! horizon with different reduction percentages keep one of these and
//! decide when entries are dropped.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::debug;

use crate::sim::engine::{self, SimulatedSeries};
use crate::sim::types::SimConfig;

/// Default number of cached `(days, seed)` entries.
pub const DEFAULT_CAPACITY: usize = 32;

/// Cache key: simulated days and seed.
pub type CacheKey = (usize, u64);

/// Bounded cache of simulated series with insertion-order eviction.
#[derive(Debug)]
pub struct SimulationCache {
    capacity: usize,
    entries: HashMap<CacheKey, Arc<SimulatedSeries>>,
    order: VecDeque<CacheKey>,
}

impl Default for SimulationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SimulationCache {
    /// Creates a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns the cached series for `config`, simulating it on a miss.
    pub fn get_or_simulate(&mut self, config: &SimConfig) -> Arc<SimulatedSeries> {
        if let Some(series) = self.get(config.days(), config.seed()) {
            debug!(days = config.days(), seed = config.seed(), "Cache hit");
            return series;
        }

        debug!(days = config.days(), seed = config.seed(), "Cache miss");
        let series = Arc::new(engine::simulate(config));
        self.insert(Arc::clone(&series));
        series
    }

    /// Stores a series simulated outside the cache, keyed by its own config.
    ///
    /// Replacing an existing key keeps its place in the eviction order.
    pub fn insert(&mut self, series: Arc<SimulatedSeries>) {
        let key = (series.config.days(), series.config.seed());
        if self.entries.insert(key, series).is_some() {
            return;
        }
        if self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
    }

    /// Returns the cached series without simulating.
    pub fn get(&self, days: usize, seed: u64) -> Option<Arc<SimulatedSeries>> {
        self.entries.get(&(days, seed)).cloned()
    }

    /// Drops one entry. Returns `true` if it was present.
    pub fn invalidate(&mut self, days: usize, seed: u64) -> bool {
        let key = (days, seed);
        self.order.retain(|k| *k != key);
        self.entries.remove(&key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
