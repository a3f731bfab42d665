//! Deck construction and shuffling.
//!
//! ```
//! use set_engine::cards::Deck;
//!
//! let deck = Deck::build(|id| Some(id.raw()));
//! assert_eq!(deck.len(), 81);
//!
//! // Omit every card the generator has no content for
//! let partial = Deck::build(|id| (id.raw() < 9).then_some(()));
//! assert_eq!(partial.len(), 9);
//! ```

use std::time::Duration;

use rustc_hash::FxHashSet;

use super::attributes::Traits;
use super::card::{Card, CardId};
use crate::core::{DeckError, GameRng};

/// Size of a complete deck: one card per attribute combination.
pub const FULL_DECK_SIZE: usize = 81;

/// An ordered collection of uniquely identified cards.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck<C> {
    cards: Vec<Card<C>>,
}

impl<C> Deck<C> {
    /// Build the standard deck.
    ///
    /// Cards are produced in attribute traversal order (fill, shape, color,
    /// count) and each card's id is its position in that traversal.
    /// `generator` supplies the content for an id; returning `None` leaves
    /// that card out.
    pub fn build<F>(mut generator: F) -> Self
    where
        F: FnMut(CardId) -> Option<C>,
    {
        let cards = Traits::all()
            .enumerate()
            .filter_map(|(position, traits)| {
                let id = CardId::new(position as u32);
                generator(id).map(|content| Card::new(id, traits, content))
            })
            .collect();
        Self { cards }
    }

    /// Build a deck from explicit cards.
    ///
    /// Fails if two cards share an id.
    pub fn from_cards(cards: Vec<Card<C>>) -> Result<Self, DeckError> {
        let mut ids = FxHashSet::default();
        for card in &cards {
            if !ids.insert(card.id()) {
                return Err(DeckError::DuplicateId(card.id()));
            }
        }
        Ok(Self { cards })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card<C>> {
        self.cards.iter()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card<C>] {
        &self.cards
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<Card<C>> {
        self.cards
    }

    /// Give every card the same bonus window (builder style).
    #[must_use]
    pub fn with_bonus_time_limit(self, limit: Duration) -> Self {
        let cards = self
            .cards
            .into_iter()
            .map(|card| card.with_bonus_time_limit(limit))
            .collect();
        Self { cards }
    }

    /// Randomly permute the deck in place. Identities and play state are
    /// untouched.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }
}

impl<C> IntoIterator for Deck<C> {
    type Item = Card<C>;
    type IntoIter = std::vec::IntoIter<Card<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
