use super::types::{SimConfig, TimePoint};

/// An hourly simulation clock over a fixed horizon.
///
/// The `Clock` yields contiguous [`TimePoint`]s from the origin, one per
/// simulated hour, in ascending order.
///
/// # Examples
///
/// ```
/// use waste_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(3);
/// let mut hours = Vec::new();
///
/// clock.run(|t| hours.push(t.index()));
/// assert_eq!(hours, vec![0, 1, 2]);
/// ```
pub struct Clock {
    /// Next hour to hand out
    current: usize,
    /// Total hours in the horizon
    total: usize,
}

impl Clock {
    /// Creates a clock covering `total` hours.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Creates a clock covering the whole horizon of `config`.
    pub fn for_config(config: &SimConfig) -> Self {
        Self::new(config.total_steps())
    }

    /// Hands out the next hour, or `None` once the horizon is exhausted.
    pub fn tick(&mut self) -> Option<TimePoint> {
        let time = (self.current < self.total).then(|| TimePoint::new(self.current))?;
        self.current += 1;
        Some(time)
    }

    /// Hours not yet handed out.
    pub fn remaining(&self) -> usize {
        self.total - self.current
    }

    /// Runs a function for each remaining hour of the horizon.
    pub fn run(&mut self, mut f: impl FnMut(TimePoint)) {
        while let Some(time) = self.tick() {
            f(time);
        }
    }
}

impl Iterator for Clock {
    type Item = TimePoint;

    fn next(&mut self) -> Option<TimePoint> {
        self.tick()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for Clock {}
