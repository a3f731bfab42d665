//! # set-engine
//!
//! Rules engine for a Set-style matching card game.
//!
//! ## Design Principles
//!
//! 1. **Caller-Driven**: Every state change is a synchronous intent
//!    (`choose`, `deal_more`, `shuffle`, `reset`). The engine schedules
//!    nothing of its own.
//!
//! 2. **Presentation-Agnostic**: Card content is an opaque `C` supplied by
//!    the caller. Drawing, animation and layout live elsewhere.
//!
//! 3. **No Errors in Play**: Edge cases (unknown card, full selection,
//!    empty deck) are reported as values. Only construction can fail.
//!
//! ## Architecture
//!
//! - **Explicit Timer Transitions**: Bonus time is a pure function of a
//!   captured timestamp and the current time from a pluggable `Clock`.
//!
//! - **Deterministic Shuffles**: All randomness flows through a seeded
//!   ChaCha8 `GameRng`; a seed replays the whole session.
//!
//! ## Modules
//!
//! - `core`: configuration, RNG, clock, errors
//! - `cards`: attributes, cards, bonus timers, deck construction
//! - `rules`: the matching rule and set search
//! - `zones`: deck cursor, hand and discard pile
//! - `game`: the engine and its projections

pub mod cards;
pub mod core;
pub mod game;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Clock, ConfigError, DeckError, FullSelectionPolicy, GameConfig, GameError, GameRng,
    ManualClock, SystemClock, Timestamp,
};

pub use crate::cards::{
    Attribute, BonusTimer, Card, CardId, Color, Count, Deck, Fill, Shape, Traits, FULL_DECK_SIZE,
};

pub use crate::rules::{find_all_sets, find_set, is_set, SET_SIZE};

pub use crate::zones::{Zone, ZoneManager};

pub use crate::game::{CardView, ChooseOutcome, GameView, IgnoreReason, Selection, SetGame};
