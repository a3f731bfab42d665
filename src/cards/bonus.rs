//! Per-card bonus timer.
//!
//! A card can earn a bonus if it is matched before it has spent
//! `limit` in total face up (selected and unmatched). The timer is a plain
//! value: `start` and `stop` record transitions, and every read takes the
//! current [`Timestamp`] explicitly. Nothing ticks in the background.
//!
//! ```
//! use std::time::Duration;
//! use set_engine::cards::BonusTimer;
//! use set_engine::core::Timestamp;
//!
//! let at = |s| Timestamp::from_offset(Duration::from_secs(s));
//!
//! let mut timer = BonusTimer::new(Duration::from_secs(6));
//! timer.start(at(0));
//! assert_eq!(timer.remaining(at(2)), Duration::from_secs(4));
//!
//! timer.stop(at(2));
//! assert_eq!(timer.remaining(at(100)), Duration::from_secs(4));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTimer {
    /// Total face-up time allowed. Zero means no bonus is available.
    limit: Duration,
    /// Face-up time accumulated before the current run.
    past_face_up: Duration,
    /// Start of the current face-up run, if one is in progress.
    last_face_up: Option<Timestamp>,
}

impl BonusTimer {
    #[must_use]
    pub const fn new(limit: Duration) -> Self {
        Self {
            limit,
            past_face_up: Duration::ZERO,
            last_face_up: None,
        }
    }

    #[must_use]
    pub const fn limit(&self) -> Duration {
        self.limit
    }

    /// Accumulated time from completed runs.
    #[must_use]
    pub const fn past_face_up(&self) -> Duration {
        self.past_face_up
    }

    /// Start of the running face-up period.
    #[must_use]
    pub const fn last_face_up(&self) -> Option<Timestamp> {
        self.last_face_up
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.last_face_up.is_some()
    }

    /// Total face-up time as of `now`.
    #[must_use]
    pub fn face_up_time(&self, now: Timestamp) -> Duration {
        match self.last_face_up {
            Some(since) => self.past_face_up + now.since(since),
            None => self.past_face_up,
        }
    }

    /// `max(0, limit - face_up_time)`.
    #[must_use]
    pub fn remaining(&self, now: Timestamp) -> Duration {
        self.limit.saturating_sub(self.face_up_time(now))
    }

    /// Remaining time as a fraction of the limit, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction_remaining(&self, now: Timestamp) -> f64 {
        let remaining = self.remaining(now);
        if self.limit.is_zero() || remaining.is_zero() {
            return 0.0;
        }
        remaining.as_secs_f64() / self.limit.as_secs_f64()
    }

    /// Begin a face-up run at `now`.
    ///
    /// Ignored if a run is already in progress or the window is used up.
    pub fn start(&mut self, now: Timestamp) {
        if self.last_face_up.is_none() && !self.remaining(now).is_zero() {
            self.last_face_up = Some(now);
        }
    }

    /// End the current run, folding its elapsed time into the total.
    pub fn stop(&mut self, now: Timestamp) {
        self.past_face_up = self.face_up_time(now);
        self.last_face_up = None;
    }
}
