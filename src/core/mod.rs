//! Core engine types: configuration, RNG, clock and errors.
//!
//! Nothing here knows about cards or rules. The game layer builds on these.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{
    FullSelectionPolicy, GameConfig, DEFAULT_BONUS_TIME_LIMIT, DEFAULT_HAND_CAPACITY,
    DEFAULT_INITIAL_HAND_SIZE,
};
pub use error::{ConfigError, DeckError, GameError};
pub use rng::GameRng;
