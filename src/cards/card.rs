//! Cards: immutable identity plus mutable play state.
//!
//! Identity (id, traits, content) never changes after construction. Play
//! state is only changed through the transition methods below, which the
//! engine calls; each transition keeps the bonus timer in step with the
//! selection flags.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::attributes::{Color, Count, Fill, Shape, Traits};
use super::bonus::BonusTimer;
use crate::core::{Timestamp, DEFAULT_BONUS_TIME_LIMIT};

/// Card identifier, stable for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card with its display content `C`.
///
/// The engine never looks inside `C`; it only clones and compares it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card<C> {
    id: CardId,
    traits: Traits,
    content: C,

    is_selected: bool,
    is_matched: bool,
    is_discarded: bool,
    is_mismatched: bool,
    seen: bool,
    bonus: BonusTimer,
}

impl<C> Card<C> {
    /// Create a card with fresh play state and the default bonus window.
    #[must_use]
    pub fn new(id: CardId, traits: Traits, content: C) -> Self {
        Self {
            id,
            traits,
            content,
            is_selected: false,
            is_matched: false,
            is_discarded: false,
            is_mismatched: false,
            seen: false,
            bonus: BonusTimer::new(DEFAULT_BONUS_TIME_LIMIT),
        }
    }

    /// Replace the bonus window (builder style).
    #[must_use]
    pub fn with_bonus_time_limit(mut self, limit: Duration) -> Self {
        self.bonus = BonusTimer::new(limit);
        self
    }

    // === Identity ===

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn traits(&self) -> Traits {
        self.traits
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.traits.shape
    }

    #[must_use]
    pub fn fill(&self) -> Fill {
        self.traits.fill
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.traits.color
    }

    #[must_use]
    pub fn count(&self) -> Count {
        self.traits.count
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    // === Play state ===

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.is_matched
    }

    #[must_use]
    pub fn is_discarded(&self) -> bool {
        self.is_discarded
    }

    /// Part of a three-card selection that failed to match.
    #[must_use]
    pub fn is_mismatched(&self) -> bool {
        self.is_mismatched
    }

    /// Has been dealt into the hand at some point.
    #[must_use]
    pub fn seen(&self) -> bool {
        self.seen
    }

    #[must_use]
    pub fn bonus_timer(&self) -> &BonusTimer {
        &self.bonus
    }

    #[must_use]
    pub fn bonus_time_limit(&self) -> Duration {
        self.bonus.limit()
    }

    #[must_use]
    pub fn bonus_time_remaining(&self, now: Timestamp) -> Duration {
        self.bonus.remaining(now)
    }

    #[must_use]
    pub fn bonus_fraction_remaining(&self, now: Timestamp) -> f64 {
        self.bonus.fraction_remaining(now)
    }

    /// Matched before the bonus window ran out.
    #[must_use]
    pub fn has_earned_bonus(&self, now: Timestamp) -> bool {
        self.is_matched && !self.bonus.remaining(now).is_zero()
    }

    /// Face up, unmatched and still inside the bonus window.
    #[must_use]
    pub fn is_consuming_bonus_time(&self, now: Timestamp) -> bool {
        self.is_selected && !self.is_matched && !self.bonus.remaining(now).is_zero()
    }

    // === Transitions ===

    /// unselected -> selected. Starts the bonus clock.
    pub(crate) fn select(&mut self, now: Timestamp) {
        self.is_selected = true;
        if !self.is_matched {
            self.bonus.start(now);
        }
    }

    /// selected -> unselected. Stops the clock and clears the mismatch flag.
    pub(crate) fn deselect(&mut self, now: Timestamp) {
        self.is_selected = false;
        self.is_mismatched = false;
        self.bonus.stop(now);
    }

    /// -> matched and discarded. Stops the clock for good.
    pub(crate) fn resolve_match(&mut self, now: Timestamp) {
        self.is_matched = true;
        self.is_discarded = true;
        self.is_selected = false;
        self.is_mismatched = false;
        self.bonus.stop(now);
    }

    pub(crate) fn set_mismatched(&mut self, mismatched: bool) {
        self.is_mismatched = mismatched;
    }

    pub(crate) fn mark_seen(&mut self) {
        self.seen = true;
    }

    /// Wipe play state for a new game, keeping identity and the bonus window.
    pub(crate) fn reset_play_state(&mut self) {
        self.is_selected = false;
        self.is_matched = false;
        self.is_discarded = false;
        self.is_mismatched = false;
        self.seen = false;
        self.bonus = BonusTimer::new(self.bonus.limit());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_offset(Duration::from_secs(secs))
    }

    fn card() -> Card<&'static str> {
        Card::new(
            CardId::new(5),
            Traits::new(Shape::Diamond, Fill::Solid, Color::Red, Count::Two),
            "♦",
        )
    }

    #[test]
    fn test_new_card() {
        let card = card();
        assert_eq!(card.id(), CardId::new(5));
        assert_eq!(card.shape(), Shape::Diamond);
        assert_eq!(card.fill(), Fill::Solid);
        assert_eq!(card.color(), Color::Red);
        assert_eq!(card.count(), Count::Two);
        assert_eq!(*card.content(), "♦");
        assert!(!card.is_selected());
        assert!(!card.is_matched());
        assert!(!card.is_discarded());
        assert!(!card.seen());
        assert_eq!(card.bonus_time_limit(), Duration::from_secs(6));
    }

    #[test]
    fn test_select_and_deselect_drive_timer() {
        let mut card = card();

        card.select(at(0));
        assert!(card.is_selected());
        assert!(card.is_consuming_bonus_time(at(1)));
        assert_eq!(card.bonus_time_remaining(at(2)), Duration::from_secs(4));

        card.deselect(at(2));
        assert!(!card.is_selected());
        assert!(!card.is_consuming_bonus_time(at(3)));
        assert_eq!(card.bonus_time_remaining(at(50)), Duration::from_secs(4));
    }

    #[test]
    fn test_deselect_clears_mismatch() {
        let mut card = card();
        card.select(at(0));
        card.set_mismatched(true);
        assert!(card.is_mismatched());

        card.deselect(at(1));
        assert!(!card.is_mismatched());
    }

    #[test]
    fn test_match_within_window_earns_bonus() {
        let mut card = card();
        card.select(at(0));
        card.resolve_match(at(3));

        assert!(card.is_matched());
        assert!(card.is_discarded());
        assert!(!card.is_selected());
        assert!(card.has_earned_bonus(at(100)));
        assert_eq!(card.bonus_time_remaining(at(100)), Duration::from_secs(3));
    }

    #[test]
    fn test_match_after_window_earns_nothing() {
        let mut card = card();
        card.select(at(0));
        card.resolve_match(at(7));

        assert!(card.is_matched());
        assert!(!card.has_earned_bonus(at(7)));
    }

    #[test]
    fn test_zero_limit_card() {
        let mut card = card().with_bonus_time_limit(Duration::ZERO);
        card.select(at(0));
        card.resolve_match(at(0));

        assert!(!card.has_earned_bonus(at(0)));
        assert_eq!(card.bonus_fraction_remaining(at(0)), 0.0);
    }

    #[test]
    fn test_reset_play_state() {
        let mut card = card().with_bonus_time_limit(Duration::from_secs(10));
        card.mark_seen();
        card.select(at(0));
        card.resolve_match(at(1));

        card.reset_play_state();
        assert!(!card.is_matched());
        assert!(!card.is_discarded());
        assert!(!card.seen());
        assert_eq!(card.bonus_time_limit(), Duration::from_secs(10));
        assert_eq!(card.bonus_time_remaining(at(99)), Duration::from_secs(10));
        assert_eq!(*card.content(), "♦");
    }

    #[test]
    fn test_display() {
        assert_eq!(CardId::new(42).to_string(), "Card(42)");
    }
}
