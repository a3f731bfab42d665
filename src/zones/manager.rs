//! Zone manager for card locations and movement.
//!
//! Tracks the three places a card can be:
//! - `Deck`: the shuffled master order; cards at and after the cursor are undealt
//! - `Hand`: dealt and visible, in deal order
//! - `Discard`: matched and removed, in resolution order
//!
//! A card that has entered play is in exactly one of `Hand` or `Discard`.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::GameRng;

/// Where a card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Not yet dealt.
    Deck,
    /// In the hand.
    Hand,
    /// Matched and discarded.
    Discard,
}

/// Manages card order and location across zones.
///
/// ```
/// use set_engine::cards::CardId;
/// use set_engine::zones::{Zone, ZoneManager};
///
/// let mut zones = ZoneManager::new((0..5).map(CardId::new));
/// assert_eq!(zones.deal_next(3), Some(CardId::new(0)));
/// assert_eq!(zones.zone_of(CardId::new(0)), Some(Zone::Hand));
/// assert_eq!(zones.zone_of(CardId::new(1)), Some(Zone::Deck));
/// ```
#[derive(Clone, Debug)]
pub struct ZoneManager {
    /// Master deck order. Never shrinks; `cursor` marks the next card to deal.
    deck: Vector<CardId>,
    cursor: usize,
    hand: Vector<CardId>,
    discard: Vector<CardId>,
    locations: FxHashMap<CardId, Zone>,
}

impl ZoneManager {
    /// Create a manager with every card undealt, in the given order.
    #[must_use]
    pub fn new(order: impl IntoIterator<Item = CardId>) -> Self {
        let deck: Vector<CardId> = order.into_iter().collect();
        let locations = deck.iter().map(|&id| (id, Zone::Deck)).collect();
        Self {
            deck,
            cursor: 0,
            hand: Vector::new(),
            discard: Vector::new(),
            locations,
        }
    }

    /// Get the zone a card is in. `None` for ids not in this game.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn is_in_zone(&self, card: CardId, zone: Zone) -> bool {
        self.zone_of(card) == Some(zone)
    }

    /// Full deck in shuffled order, dealt cards included.
    #[must_use]
    pub fn deck(&self) -> &Vector<CardId> {
        &self.deck
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardId> {
        &self.hand
    }

    #[must_use]
    pub fn discard(&self) -> &Vector<CardId> {
        &self.discard
    }

    /// Index of the next card to deal.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cards not yet dealt.
    #[must_use]
    pub fn undealt(&self) -> usize {
        self.deck.len() - self.cursor
    }

    /// Move the next undealt card into the hand.
    ///
    /// Returns `None` when the deck is exhausted or the hand already holds
    /// `capacity` cards.
    pub fn deal_next(&mut self, capacity: usize) -> Option<CardId> {
        if self.cursor >= self.deck.len() || self.hand.len() >= capacity {
            return None;
        }
        let card = self.deck[self.cursor];
        self.cursor += 1;
        self.hand.push_back(card);
        self.locations.insert(card, Zone::Hand);
        Some(card)
    }

    /// Move a card from the hand to the discard pile.
    ///
    /// Returns `false` if the card was not in the hand.
    pub fn discard_from_hand(&mut self, card: CardId) -> bool {
        let Some(index) = self.hand.iter().position(|&c| c == card) else {
            return false;
        };
        self.hand.remove(index);
        self.discard.push_back(card);
        self.locations.insert(card, Zone::Discard);
        true
    }

    /// Shuffle the undealt cards. Hand and discard order are untouched.
    pub fn shuffle_undealt(&mut self, rng: &mut GameRng) {
        let tail = self.deck.split_off(self.cursor);
        let mut tail: Vec<CardId> = tail.into_iter().collect();
        rng.shuffle(&mut tail);
        self.deck.extend(tail);
    }

    /// Total cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
    }
}
