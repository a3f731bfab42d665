//! Construction-time errors.
//!
//! Ordinary play never fails: unknown cards, full selections and empty
//! decks are reported through return values. These errors only cover setup
//! mistakes that would otherwise leave the engine in a corrupt state.

use crate::cards::CardId;

/// Invalid [`GameConfig`](super::GameConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("hand capacity must be at least 1")]
    ZeroCapacity,
    #[error("initial hand of {initial} cards exceeds hand capacity {capacity}")]
    InitialHandExceedsCapacity { initial: usize, capacity: usize },
}

/// Malformed deck.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),
}

/// Any error raised while constructing a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid deck: {0}")]
    Deck(#[from] DeckError),
}
