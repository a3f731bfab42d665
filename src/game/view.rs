//! Serializable snapshot of what a presentation layer draws.
//!
//! Bonus values are evaluated once, at the moment the view is taken, so a
//! renderer gets a consistent picture without calling back into the engine.

use serde::Serialize;

use super::engine::SetGame;
use crate::cards::{Card, CardId, Color, Count, Fill, Shape};
use crate::core::{Clock, Timestamp};

/// One card as the player sees it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView<C> {
    pub id: CardId,
    pub shape: Shape,
    pub fill: Fill,
    pub color: Color,
    pub count: Count,
    pub content: C,
    pub is_selected: bool,
    pub is_matched: bool,
    pub is_mismatched: bool,
    pub bonus_time_remaining_secs: f64,
    pub bonus_fraction_remaining: f64,
    pub has_earned_bonus: bool,
}

impl<C: Clone> CardView<C> {
    #[must_use]
    pub fn of(card: &Card<C>, now: Timestamp) -> Self {
        Self {
            id: card.id(),
            shape: card.shape(),
            fill: card.fill(),
            color: card.color(),
            count: card.count(),
            content: card.content().clone(),
            is_selected: card.is_selected(),
            is_matched: card.is_matched(),
            is_mismatched: card.is_mismatched(),
            bonus_time_remaining_secs: card.bonus_time_remaining(now).as_secs_f64(),
            bonus_fraction_remaining: card.bonus_fraction_remaining(now),
            has_earned_bonus: card.has_earned_bonus(now),
        }
    }
}

/// The whole table at one instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameView<C> {
    pub hand: Vec<CardView<C>>,
    pub discarded: Vec<CardView<C>>,
    pub selection: Vec<CardId>,
    pub remaining_in_deck: usize,
}

impl<C: Clone, K: Clock + Clone> SetGame<C, K> {
    /// Snapshot the hand, discard pile and selection.
    #[must_use]
    pub fn view(&self) -> GameView<C> {
        let now = self.now();
        GameView {
            hand: self.hand().map(|card| CardView::of(card, now)).collect(),
            discarded: self.discarded().map(|card| CardView::of(card, now)).collect(),
            selection: self.selection().to_vec(),
            remaining_in_deck: self.remaining_in_deck(),
        }
    }
}
