use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A source of monotonic timestamps.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Reads the operating system's monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct Monotonic;

impl TimeSource for Monotonic {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Simulated monotonic time.
///
/// Starts at the instant it was created and only moves when
/// [`ManualTime::advance`] is called.
#[derive(Debug)]
pub struct ManualTime {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Move time forward.
    ///
    /// # Arguments
    ///
    /// * `by` - How far to advance the clock.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Total simulated time since creation.
    pub fn offset(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
