//! Time source for bonus-timer bookkeeping.
//!
//! The engine never runs a timer of its own. Card bonus time is a pure
//! function of a captured [`Timestamp`] and "now", and "now" comes from a
//! [`Clock`] the caller picks:
//!
//! - [`SystemClock`]: monotonic wall-clock time (production).
//! - [`ManualClock`]: time that only moves when told to (tests, replays).
//!
//! ```
//! use std::time::Duration;
//! use set_engine::core::{Clock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_secs(2));
//! assert_eq!(clock.now().since(start), Duration::from_secs(2));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// A point in time, measured from the origin of the clock that produced it.
///
/// Timestamps from different clocks are not comparable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The clock origin.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Create a timestamp at `offset` past the clock origin.
    #[must_use]
    pub const fn from_offset(offset: Duration) -> Self {
        Self(offset)
    }

    /// Offset from the clock origin.
    #[must_use]
    pub const fn offset(self) -> Duration {
        self.0
    }

    /// Time elapsed since `earlier`, saturating at zero.
    #[must_use]
    pub fn since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Source of "now" for the engine.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Timestamp;
}

/// Monotonic clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the moment of construction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed())
    }
}

/// Manually driven clock.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the engine.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock stopped at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(duration_to_nanos(by), Ordering::SeqCst);
    }

    /// Jump to an absolute offset from the origin.
    pub fn set(&self, offset: Duration) {
        self.nanos.store(duration_to_nanos(offset), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(Duration::from_nanos(self.nanos.load(Ordering::SeqCst)))
    }
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
