//! Game configuration.
//!
//! The reference game deals 12 cards, caps the hand at 36 and gives every
//! card a 6 second bonus window. All of these are configurable so tests and
//! variants can tighten or relax them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Cards dealt when a game starts.
pub const DEFAULT_INITIAL_HAND_SIZE: usize = 12;

/// Maximum number of cards in the hand.
pub const DEFAULT_HAND_CAPACITY: usize = 36;

/// Bonus window granted to every card.
pub const DEFAULT_BONUS_TIME_LIMIT: Duration = Duration::from_secs(6);

/// What `choose` does with a fourth card while three are selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FullSelectionPolicy {
    /// Leave everything as is. The player must deselect first.
    #[default]
    Ignore,
    /// Deselect the current three and start a new selection with the card.
    StartNew,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards dealt into the hand at game start.
    pub initial_hand_size: usize,

    /// Upper bound on hand size; `deal_more` stops here.
    pub hand_capacity: usize,

    /// Bonus window for each card. Zero disables bonuses.
    pub bonus_time_limit: Duration,

    /// Shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Behaviour when choosing a card while the selection is full.
    pub full_selection: FullSelectionPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_hand_size: DEFAULT_INITIAL_HAND_SIZE,
            hand_capacity: DEFAULT_HAND_CAPACITY,
            bonus_time_limit: DEFAULT_BONUS_TIME_LIMIT,
            seed: None,
            full_selection: FullSelectionPolicy::Ignore,
        }
    }
}

impl GameConfig {
    /// Create the reference configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the hand capacity.
    #[must_use]
    pub fn with_hand_capacity(mut self, capacity: usize) -> Self {
        self.hand_capacity = capacity;
        self
    }

    /// Set the per-card bonus window.
    #[must_use]
    pub fn with_bonus_time_limit(mut self, limit: Duration) -> Self {
        self.bonus_time_limit = limit;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the full-selection policy.
    #[must_use]
    pub fn with_full_selection(mut self, policy: FullSelectionPolicy) -> Self {
        self.full_selection = policy;
        self
    }

    /// Check the configuration for values the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.initial_hand_size > self.hand_capacity {
            return Err(ConfigError::InitialHandExceedsCapacity {
                initial: self.initial_hand_size,
                capacity: self.hand_capacity,
            });
        }
        Ok(())
    }
}
