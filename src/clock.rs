//! Monotonic time source and per-tick elapsed time.

use std::time::{Duration, Instant};

/// Monotonic clock. `now` is measured from an arbitrary fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by `Instant`.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Yields the milliseconds elapsed since the previous call. Sub-millisecond
/// remainders carry over into the next call.
#[derive(Debug)]
pub struct TickTimer<C: Clock> {
    clock: C,
    last: Duration,
}

impl<C: Clock> TickTimer<C> {
    pub fn new(clock: C) -> Self {
        let last = clock.now();
        Self { clock, last }
    }

    pub fn elapsed_ms(&mut self) -> u64 {
        let now = self.clock.now();
        // zero if the clock ever steps backwards
        let delta = now.saturating_sub(self.last);
        let ms = delta.as_millis() as u64;
        self.last += Duration::from_millis(ms);
        ms
    }
}
