//! The game engine.
//!
//! `SetGame` owns the deck, hand, discard pile and selection and moves them
//! forward in response to caller intents. Every intent runs to completion
//! synchronously; nothing happens between calls except that the clock keeps
//! moving, which only affects bonus-time reads.
//!
//! ## Usage
//!
//! ```
//! use set_engine::{ChooseOutcome, GameConfig, SetGame};
//!
//! let mut game = SetGame::new(GameConfig::new().with_seed(7), |id| Some(id.raw()))
//!     .expect("valid config");
//! assert_eq!(game.hand_len(), 12);
//!
//! let first = game.hand_ids()[0];
//! assert_eq!(game.choose(first), ChooseOutcome::Selected);
//! assert_eq!(game.choose(first), ChooseOutcome::Deselected);
//!
//! game.deal_more();
//! assert_eq!(game.hand_len(), 13);
//! ```

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::selection::Selection;
use crate::cards::{Card, CardId, Deck};
use crate::core::{
    Clock, FullSelectionPolicy, GameConfig, GameError, GameRng, SystemClock, Timestamp,
};
use crate::rules::{self, Violations, SET_SIZE};
use crate::zones::{Zone, ZoneManager};

/// Why a `choose` intent changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The id is not in the hand (unknown, undealt or discarded).
    NotInHand,
    /// Three cards are already selected and the policy is `Ignore`.
    SelectionFull,
}

/// Result of a `choose` intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChooseOutcome {
    /// Card added to a selection of fewer than three.
    Selected,
    /// Card removed from the selection.
    Deselected,
    /// Third card completed a set; all three are now discarded.
    Matched([CardId; SET_SIZE]),
    /// Third card completed a non-set; all three stay selected and flagged.
    Mismatched {
        cards: [CardId; SET_SIZE],
        violations: Violations,
    },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

/// Rules engine for one game of Set.
///
/// Generic over the card content `C` (opaque to the engine) and the clock
/// `K` used for bonus timing.
#[derive(Clone, Debug)]
pub struct SetGame<C, K = SystemClock> {
    config: GameConfig,
    /// Unshuffled deck with fresh play state, kept for `reset`.
    template: Deck<C>,
    cards: FxHashMap<CardId, Card<C>>,
    zones: ZoneManager,
    selection: Selection,
    rng: GameRng,
    clock: K,
}

impl<C: Clone> SetGame<C, SystemClock> {
    /// Start a game on the standard deck, timed by the system clock.
    ///
    /// `generator` supplies each card's content; see [`Deck::build`].
    pub fn new<F>(config: GameConfig, generator: F) -> Result<Self, GameError>
    where
        F: FnMut(CardId) -> Option<C>,
    {
        Self::with_clock(config, generator, SystemClock::new())
    }
}

impl<C: Clone, K: Clock + Clone> SetGame<C, K> {
    /// Start a game on the standard deck with a caller-supplied clock.
    ///
    /// Every card gets `config.bonus_time_limit` as its bonus window.
    pub fn with_clock<F>(config: GameConfig, generator: F, clock: K) -> Result<Self, GameError>
    where
        F: FnMut(CardId) -> Option<C>,
    {
        let deck = Deck::build(generator).with_bonus_time_limit(config.bonus_time_limit);
        Self::from_deck(config, deck, clock)
    }

    /// Start a game on an arbitrary deck (partial decks, fixed orders).
    ///
    /// The deck is shuffled like any other. Each card keeps the bonus window
    /// it was built with; `config.bonus_time_limit` is not applied.
    pub fn from_deck(config: GameConfig, deck: Deck<C>, clock: K) -> Result<Self, GameError> {
        config.validate()?;
        let rng = GameRng::from_seed_or_entropy(config.seed);
        Ok(Self::start(config, deck, rng, clock))
    }

    fn start(config: GameConfig, template: Deck<C>, mut rng: GameRng, clock: K) -> Self {
        let mut deck = template.clone();
        deck.shuffle(&mut rng);

        let zones = ZoneManager::new(deck.iter().map(Card::id));
        let cards = deck
            .into_iter()
            .map(|mut card| {
                card.reset_play_state();
                (card.id(), card)
            })
            .collect();

        let mut game = Self {
            config,
            template,
            cards,
            zones,
            selection: Selection::new(),
            rng,
            clock,
        };
        for _ in 0..game.config.initial_hand_size {
            if game.deal_next().is_none() {
                break;
            }
        }

        debug!(
            seed = game.rng.seed(),
            deck = game.zones.total_cards(),
            hand = game.zones.hand().len(),
            "game started"
        );
        game
    }

    // === Intents ===

    /// Select or deselect a card in the hand.
    ///
    /// Completing a selection of three evaluates it immediately.
    pub fn choose(&mut self, id: CardId) -> ChooseOutcome {
        if !self.zones.is_in_zone(id, Zone::Hand) {
            trace!(card = %id, "choose ignored: not in hand");
            return ChooseOutcome::Ignored(IgnoreReason::NotInHand);
        }

        let now = self.clock.now();

        if self.selection.contains(id) {
            self.deselect(id, now);
            return ChooseOutcome::Deselected;
        }

        if self.selection.is_full() {
            match self.config.full_selection {
                FullSelectionPolicy::Ignore => {
                    trace!(card = %id, "choose ignored: selection full");
                    return ChooseOutcome::Ignored(IgnoreReason::SelectionFull);
                }
                FullSelectionPolicy::StartNew => self.clear_selection(now),
            }
        }

        // A third card is judged before any state changes.
        let verdict = match *self.selection.as_slice() {
            [first, second] => {
                let triple = [first, second, id];
                match self.violations_of(triple) {
                    Some(violations) => Some((triple, violations)),
                    None => return ChooseOutcome::Ignored(IgnoreReason::NotInHand),
                }
            }
            _ => None,
        };

        self.selection.push(id);
        if let Some(card) = self.cards.get_mut(&id) {
            card.select(now);
        }
        trace!(card = %id, selected = self.selection.len(), "card selected");

        match verdict {
            Some((triple, violations)) => self.resolve(triple, violations, now),
            None => ChooseOutcome::Selected,
        }
    }

    /// Deal one more card if the deck and hand capacity allow.
    pub fn deal_more(&mut self) -> Option<CardId> {
        let dealt = self.deal_next();
        match dealt {
            Some(id) => debug!(card = %id, hand = self.zones.hand().len(), "dealt card"),
            None => trace!(
                undealt = self.zones.undealt(),
                hand = self.zones.hand().len(),
                "deal ignored"
            ),
        }
        dealt
    }

    /// Deal up to `n` cards, stopping early at the usual bounds.
    pub fn deal_more_n(&mut self, n: usize) -> Vec<CardId> {
        (0..n).map_while(|_| self.deal_more()).collect()
    }

    /// Shuffle the cards that have not been dealt yet.
    pub fn shuffle(&mut self) {
        self.zones.shuffle_undealt(&mut self.rng);
        debug!(undealt = self.zones.undealt(), "deck shuffled");
    }

    /// Throw away all state and start a new game with a fresh shuffle.
    pub fn reset(&mut self) {
        let rng = self.rng.fork();
        *self = Self::start(
            self.config.clone(),
            self.template.clone(),
            rng,
            self.clock.clone(),
        );
    }

    // === Projections ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &K {
        &self.clock
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card<C>> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn zone_of(&self, id: CardId) -> Option<Zone> {
        self.zones.zone_of(id)
    }

    /// Every card in shuffled deck order, dealt or not.
    pub fn deck(&self) -> impl Iterator<Item = &Card<C>> + '_ {
        self.lookup(self.zones.deck())
    }

    /// Cards in the hand, in deal order.
    pub fn hand(&self) -> impl Iterator<Item = &Card<C>> + '_ {
        self.lookup(self.zones.hand())
    }

    #[must_use]
    pub fn hand_ids(&self) -> Vec<CardId> {
        self.zones.hand().iter().copied().collect()
    }

    #[must_use]
    pub fn hand_len(&self) -> usize {
        self.zones.hand().len()
    }

    /// Matched cards, in the order they were resolved.
    pub fn discarded(&self) -> impl Iterator<Item = &Card<C>> + '_ {
        self.lookup(self.zones.discard())
    }

    #[must_use]
    pub fn discarded_ids(&self) -> Vec<CardId> {
        self.zones.discard().iter().copied().collect()
    }

    #[must_use]
    pub fn discarded_len(&self) -> usize {
        self.zones.discard().len()
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        self.selection.as_slice()
    }

    pub fn selected_cards(&self) -> impl Iterator<Item = &Card<C>> + '_ {
        self.selection
            .as_slice()
            .iter()
            .filter_map(|id| self.cards.get(id))
    }

    /// Index of the next card `deal_more` would deal.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.zones.cursor()
    }

    #[must_use]
    pub fn remaining_in_deck(&self) -> usize {
        self.zones.undealt()
    }

    #[must_use]
    pub fn is_deck_exhausted(&self) -> bool {
        self.zones.undealt() == 0
    }

    #[must_use]
    pub fn is_selected(&self, id: CardId) -> bool {
        self.card(id).is_some_and(Card::is_selected)
    }

    #[must_use]
    pub fn is_matched(&self, id: CardId) -> bool {
        self.card(id).is_some_and(Card::is_matched)
    }

    #[must_use]
    pub fn is_mismatched(&self, id: CardId) -> bool {
        self.card(id).is_some_and(Card::is_mismatched)
    }

    /// Remaining bonus time as of now. `None` for unknown ids.
    #[must_use]
    pub fn bonus_time_remaining(&self, id: CardId) -> Option<Duration> {
        let now = self.clock.now();
        self.card(id).map(|card| card.bonus_time_remaining(now))
    }

    #[must_use]
    pub fn bonus_fraction_remaining(&self, id: CardId) -> Option<f64> {
        let now = self.clock.now();
        self.card(id).map(|card| card.bonus_fraction_remaining(now))
    }

    #[must_use]
    pub fn has_earned_bonus(&self, id: CardId) -> bool {
        let now = self.clock.now();
        self.card(id).is_some_and(|card| card.has_earned_bonus(now))
    }

    /// One set currently in the hand, if any.
    #[must_use]
    pub fn hint(&self) -> Option<[CardId; SET_SIZE]> {
        rules::find_set(self.hand())
    }

    /// Number of distinct sets in the hand.
    #[must_use]
    pub fn sets_in_hand(&self) -> usize {
        rules::find_all_sets(self.hand()).len()
    }

    // === Internals ===

    fn lookup<'a>(
        &'a self,
        ids: &'a im::Vector<CardId>,
    ) -> impl Iterator<Item = &'a Card<C>> + 'a {
        ids.iter().filter_map(move |id| self.cards.get(id))
    }

    fn deal_next(&mut self) -> Option<CardId> {
        let id = self.zones.deal_next(self.config.hand_capacity)?;
        if let Some(card) = self.cards.get_mut(&id) {
            card.mark_seen();
        }
        Some(id)
    }

    /// Remove one card from the selection. The rest lose their mismatch
    /// flag: a partial selection is no longer an evaluated triple.
    fn deselect(&mut self, id: CardId, now: Timestamp) {
        self.selection.remove(id);
        if let Some(card) = self.cards.get_mut(&id) {
            card.deselect(now);
        }
        for other in self.selection.as_slice() {
            if let Some(card) = self.cards.get_mut(other) {
                card.set_mismatched(false);
            }
        }
        trace!(card = %id, selected = self.selection.len(), "card deselected");
    }

    fn clear_selection(&mut self, now: Timestamp) {
        for id in self.selection.take() {
            if let Some(card) = self.cards.get_mut(&id) {
                card.deselect(now);
            }
        }
    }

    /// `None` if any id has no card.
    fn violations_of(&self, triple: [CardId; SET_SIZE]) -> Option<Violations> {
        let [a, b, c] = triple.map(|id| self.cards.get(&id).map(Card::traits));
        Some(rules::violations(&a?, &b?, &c?))
    }

    fn resolve(
        &mut self,
        triple: [CardId; SET_SIZE],
        violations: Violations,
        now: Timestamp,
    ) -> ChooseOutcome {
        if violations.is_empty() {
            for id in self.selection.take() {
                if let Some(card) = self.cards.get_mut(&id) {
                    card.resolve_match(now);
                }
                self.zones.discard_from_hand(id);
            }
            debug!(
                cards = ?triple,
                hand = self.zones.hand().len(),
                discarded = self.zones.discard().len(),
                "set matched"
            );
            ChooseOutcome::Matched(triple)
        } else {
            for id in triple {
                if let Some(card) = self.cards.get_mut(&id) {
                    card.set_mismatched(true);
                }
            }
            debug!(cards = ?triple, violations = ?violations, "not a set");
            ChooseOutcome::Mismatched {
                cards: triple,
                violations,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Count, Fill, Shape, Traits};
    use crate::core::ManualClock;

    fn game(config: GameConfig) -> SetGame<u32, ManualClock> {
        SetGame::with_clock(config, |id| Some(id.raw()), ManualClock::new()).unwrap()
    }

    /// A deck whose shuffle does not matter: every test picks cards by id.
    fn seeded() -> SetGame<u32, ManualClock> {
        game(GameConfig::new().with_seed(42).with_initial_hand_size(36))
    }

    #[test]
    fn test_initial_state() {
        let game = game(GameConfig::new().with_seed(1));

        assert_eq!(game.deck().count(), 81);
        assert_eq!(game.hand_len(), 12);
        assert_eq!(game.cursor(), 12);
        assert_eq!(game.remaining_in_deck(), 69);
        assert_eq!(game.discarded_len(), 0);
        assert!(game.selection().is_empty());
        assert!(game.hand().all(|c| c.seen() && !c.is_selected()));
    }

    #[test]
    fn test_hand_is_front_of_deck() {
        let game = game(GameConfig::new().with_seed(5));
        let front: Vec<_> = game.deck().take(12).map(Card::id).collect();
        assert_eq!(game.hand_ids(), front);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let result = SetGame::with_clock(
            GameConfig::new().with_initial_hand_size(50),
            |id| Some(id.raw()),
            ManualClock::new(),
        );
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_choose_unknown_card() {
        let mut game = seeded();
        assert_eq!(
            game.choose(CardId::new(999)),
            ChooseOutcome::Ignored(IgnoreReason::NotInHand)
        );
        assert!(game.selection().is_empty());
    }

    #[test]
    fn test_choose_undealt_card() {
        let mut game = game(GameConfig::new().with_seed(2));
        let undealt = game.deck().nth(20).map(Card::id).unwrap();

        assert_eq!(
            game.choose(undealt),
            ChooseOutcome::Ignored(IgnoreReason::NotInHand)
        );
        assert!(!game.is_selected(undealt));
    }

    #[test]
    fn test_unjudgeable_triple_changes_nothing() {
        let mut game = seeded();
        let [a, b, c] = game.hint().unwrap();
        game.choose(a);
        game.choose(b);

        // Zones and cards disagree only if the engine is corrupted
        game.cards.remove(&b);

        assert_eq!(
            game.choose(c),
            ChooseOutcome::Ignored(IgnoreReason::NotInHand)
        );
        assert_eq!(game.selection(), &[a, b]);
        assert!(!game.is_selected(c));
        assert_eq!(game.hand_len(), 36);
        assert_eq!(game.discarded_len(), 0);
    }

    #[test]
    fn test_matching_triple() {
        let mut game = seeded();
        let base = |count| Traits::new(Shape::Diamond, Fill::Solid, Color::Red, count);
        // 36 of 81 dealt; fall back to a hinted set if these are not all in hand
        let triple = match [Count::One, Count::Two, Count::Three]
            .map(|count| game.hand().find(|c| c.traits() == base(count)).map(Card::id))
        {
            [Some(a), Some(b), Some(c)] => [a, b, c],
            _ => game.hint().expect("36 cards always hold a set"),
        };

        assert_eq!(game.choose(triple[0]), ChooseOutcome::Selected);
        assert_eq!(game.choose(triple[1]), ChooseOutcome::Selected);
        assert_eq!(game.choose(triple[2]), ChooseOutcome::Matched(triple));

        assert!(game.selection().is_empty());
        assert_eq!(game.hand_len(), 33);
        assert_eq!(game.discarded_ids(), triple.to_vec());
        for id in triple {
            assert!(game.is_matched(id));
            assert!(!game.is_selected(id));
            assert_eq!(game.zone_of(id), Some(Zone::Discard));
            assert!(game.card(id).unwrap().is_discarded());
        }
    }

    #[test]
    fn test_mismatch_then_deselect() {
        let mut game = seeded();
        let set = game.hint().unwrap();
        // Swap the third card for one that breaks the set
        let breaker = game
            .hand_ids()
            .into_iter()
            .find(|&id| {
                !set.contains(&id) && {
                    let t = |id| game.card(id).unwrap().traits();
                    !rules::is_set(&t(set[0]), &t(set[1]), &t(id))
                }
            })
            .unwrap();
        let triple = [set[0], set[1], breaker];

        game.choose(triple[0]);
        game.choose(triple[1]);
        let outcome = game.choose(triple[2]);
        assert!(matches!(outcome, ChooseOutcome::Mismatched { cards, ref violations }
            if cards == triple && !violations.is_empty()));

        assert_eq!(game.selection(), &triple);
        assert_eq!(game.hand_len(), 36);
        assert!(triple.iter().all(|&id| game.is_mismatched(id)));

        assert_eq!(game.choose(triple[1]), ChooseOutcome::Deselected);
        assert_eq!(game.selection(), &[triple[0], triple[2]]);
        assert!(triple.iter().all(|&id| !game.is_mismatched(id)));
        assert!(!game.is_selected(triple[1]));
    }

    #[test]
    fn test_fourth_card_ignored() {
        let mut game = seeded();
        let set = game.hint().unwrap();
        let hand = game.hand_ids();
        let others: Vec<_> = hand.iter().copied().filter(|id| !set.contains(id)).collect();

        // Two cards of a set plus anything else never match
        let triple = [set[0], set[1], others[0]];
        for id in triple {
            game.choose(id);
        }
        assert_eq!(game.selection(), &triple);

        let fourth = others[1];
        assert_eq!(
            game.choose(fourth),
            ChooseOutcome::Ignored(IgnoreReason::SelectionFull)
        );
        assert_eq!(game.selection(), &triple);
        assert!(!game.is_selected(fourth));
        assert!(triple.iter().all(|&id| game.is_mismatched(id)));
    }

    #[test]
    fn test_fourth_card_starts_new_selection() {
        let mut game = game(
            GameConfig::new()
                .with_seed(42)
                .with_initial_hand_size(36)
                .with_full_selection(FullSelectionPolicy::StartNew),
        );
        let set = game.hint().unwrap();
        let hand = game.hand_ids();
        let t = |id| game.card(id).unwrap().traits();
        let breaker = hand
            .iter()
            .copied()
            .find(|&id| !set.contains(&id) && !rules::is_set(&t(set[0]), &t(set[1]), &t(id)))
            .unwrap();
        let fourth = hand
            .iter()
            .copied()
            .find(|&id| id != breaker && !set.contains(&id))
            .unwrap();

        game.choose(set[0]);
        game.choose(set[1]);
        game.choose(breaker);
        assert_eq!(game.selection().len(), 3);

        assert_eq!(game.choose(fourth), ChooseOutcome::Selected);
        assert_eq!(game.selection(), &[fourth]);
        for id in [set[0], set[1], breaker] {
            assert!(!game.is_selected(id));
            assert!(!game.is_mismatched(id));
        }
    }

    #[test]
    fn test_choose_discarded_card() {
        let mut game = seeded();
        let set = game.hint().unwrap();
        for id in set {
            game.choose(id);
        }

        assert_eq!(
            game.choose(set[0]),
            ChooseOutcome::Ignored(IgnoreReason::NotInHand)
        );
        assert_eq!(game.discarded_len(), 3);
    }

    #[test]
    fn test_deal_more() {
        let mut game = game(GameConfig::new().with_seed(3));
        let next = game.deck().nth(12).map(Card::id);

        assert_eq!(game.deal_more(), next);
        assert_eq!(game.hand_len(), 13);
        assert_eq!(game.cursor(), 13);
        assert!(game.card(next.unwrap()).unwrap().seen());
    }

    #[test]
    fn test_deal_more_respects_capacity() {
        let mut game = seeded();
        assert_eq!(game.hand_len(), 36);
        assert_eq!(game.deal_more(), None);
        assert_eq!(game.cursor(), 36);
    }

    #[test]
    fn test_deal_more_n() {
        let mut game = game(GameConfig::new().with_seed(3).with_hand_capacity(14));
        let dealt = game.deal_more_n(3);
        assert_eq!(dealt.len(), 2);
        assert_eq!(game.hand_len(), 14);
    }

    #[test]
    fn test_deal_until_exhausted() {
        let mut game = game(GameConfig::new().with_seed(4));
        let mut rounds = 0;
        while !game.is_deck_exhausted() {
            if let Some(set) = game.hint() {
                for id in set {
                    game.choose(id);
                }
            }
            game.deal_more_n(3);
            rounds += 1;
            assert!(game.hand_len() <= 36);
            assert!(rounds < 100, "deck never ran out");
        }
        assert_eq!(game.cursor(), 81);
        assert_eq!(game.deal_more(), None);
    }

    #[test]
    fn test_shuffle_keeps_hand() {
        let mut game = game(GameConfig::new().with_seed(8));
        let hand = game.hand_ids();
        let dealt: Vec<_> = game.deck().take(12).map(Card::id).collect();
        let undealt: Vec<_> = game.deck().skip(12).map(Card::id).collect();

        game.shuffle();

        assert_eq!(game.hand_ids(), hand);
        assert_eq!(game.deck().take(12).map(Card::id).collect::<Vec<_>>(), dealt);
        let mut after: Vec<_> = game.deck().skip(12).map(Card::id).collect();
        assert_ne!(after, undealt);
        after.sort();
        let mut before = undealt;
        before.sort();
        assert_eq!(after, before);
    }

    #[test]
    fn test_reset() {
        let mut game = seeded();
        let set = game.hint().unwrap();
        for id in set {
            game.choose(id);
        }
        let old_order: Vec<_> = game.deck().map(Card::id).collect();

        game.reset();

        assert_eq!(game.hand_len(), 36);
        assert_eq!(game.discarded_len(), 0);
        assert!(game.selection().is_empty());
        assert_eq!(game.cursor(), 36);
        assert!(game.deck().all(|c| !c.is_matched() && !c.is_discarded()));
        assert_ne!(game.deck().map(Card::id).collect::<Vec<_>>(), old_order);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = game(GameConfig::new().with_seed(99));
        let b = game(GameConfig::new().with_seed(99));
        assert_eq!(a.hand_ids(), b.hand_ids());

        let mut a = a;
        let mut b = b;
        a.reset();
        b.reset();
        assert_eq!(a.hand_ids(), b.hand_ids());
    }

    #[test]
    fn test_partial_deck() {
        let deck = Deck::build(|id| (id.raw() < 6).then_some(id.raw()));
        let game = SetGame::from_deck(GameConfig::new().with_seed(1), deck, ManualClock::new())
            .unwrap();

        assert_eq!(game.hand_len(), 6);
        assert!(game.is_deck_exhausted());
    }
}
