use std::time::{Duration, Instant};

/// Cooperative refresh ticker for the presentation layer.
///
/// The next tick is armed only after the previous callback returns, so a slow
/// tick delays the following one instead of causing ticks to be skipped or
/// bunched up.
pub struct TickClock {
    last_tick: Instant,
    period: Duration,
}

impl TickClock {
    /// Create a new ticker. The first tick fires one period from now.
    ///
    /// # Arguments
    ///
    /// * `hz` - Ticks per second. Clamped to at least 1.
    pub fn new(hz: u32) -> Self {
        Self {
            last_tick: Instant::now(),
            period: Duration::from_secs(1) / hz.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Manually trigger the ticker.
    ///
    /// * `callback` - The callback to run. The ticker re-arms once it returns.
    pub fn trigger<F>(&mut self, mut callback: F)
    where
        F: FnMut(),
    {
        callback();
        self.last_tick = Instant::now();
    }

    /// Trigger a tick if a full period has passed since the last one.
    ///
    /// Will return true if a tick was triggered.
    ///
    /// # Arguments
    ///
    /// * `callback` - The function to call if the ticker fires.
    pub fn tick<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(),
    {
        let should_trigger = self.last_tick.elapsed() >= self.period;

        if should_trigger {
            self.trigger(callback);
        }

        should_trigger
    }

    /// How long until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.last_tick.elapsed())
    }
}
