//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `Zone`: Deck, Hand or Discard
//! - `ZoneManager`: deal cursor, ordered zones and card lookup

pub mod manager;

pub use manager::{Zone, ZoneManager};
