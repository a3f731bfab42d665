//! Card model: attributes, cards, bonus timers and decks.
//!
//! ## Key Types
//!
//! - `Shape`, `Fill`, `Color`, `Count`: the four attribute domains
//! - `Traits`: one value from each domain
//! - `Card`: identity plus play state
//! - `BonusTimer`: face-up time accounting for bonus eligibility
//! - `Deck`: deterministic deck construction and shuffling

pub mod attributes;
pub mod bonus;
pub mod card;
pub mod deck;

pub use attributes::{Attribute, Color, Count, Fill, Shape, Traits};
pub use bonus::BonusTimer;
pub use card::{Card, CardId};
pub use deck::{Deck, FULL_DECK_SIZE};
