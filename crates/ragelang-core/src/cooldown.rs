//! Cooldown gating between roasts.
//!
//! Time is read through the [`Clock`] trait so the trigger engine can be driven by a
//! [`ManualClock`] in tests and benchmarks.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Default minimum interval between two roasts.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(3000);

/// A monotonic time source.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle while the engine owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let elapsed = *self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        self.base + elapsed
    }
}

/// Last-fire timestamp plus the minimum interval between fires.
#[derive(Debug, Clone)]
pub struct CooldownClock {
    interval: Duration,
    last_fire: Option<Instant>,
}

impl CooldownClock {
    /// Create a cooldown that has never fired.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    /// Minimum interval between fires.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the minimum interval. The last-fire timestamp is kept.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// When the last fire happened, if ever.
    pub fn last_fire(&self) -> Option<Instant> {
        self.last_fire
    }

    /// Returns `true` if a fire at `now` is allowed.
    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last_fire {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Time left until a fire would be allowed (zero when ready).
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_fire {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Record an actual fire at `now`.
    pub fn record_fire(&mut self, now: Instant) {
        self.last_fire = Some(now);
    }
}

impl Default for CooldownClock {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
