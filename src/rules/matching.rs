//! The matching rule.
//!
//! Three cards form a set when, for each of the four attributes on its own,
//! the three values are either all equal or all different.
//!
//! ```
//! use set_engine::cards::{Color, Count, Fill, Shape, Traits};
//! use set_engine::rules::is_set;
//!
//! let diamond = |count| Traits::new(Shape::Diamond, Fill::Solid, Color::Red, count);
//! assert!(is_set(&diamond(Count::One), &diamond(Count::Two), &diamond(Count::Three)));
//! assert!(!is_set(&diamond(Count::One), &diamond(Count::One), &diamond(Count::Three)));
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{Attribute, Card, CardId, Color, Count, Fill, Shape, Traits};

/// Number of cards in a set.
pub const SET_SIZE: usize = 3;

/// Attributes that break a would-be set. Empty means the triple is a set.
pub type Violations = SmallVec<[Attribute; 4]>;

/// All equal or all different.
#[must_use]
pub fn attribute_agrees(a: u8, b: u8, c: u8) -> bool {
    let all_equal = a == b && b == c;
    let all_distinct = a != b && b != c && a != c;
    all_equal || all_distinct
}

/// Attributes on which the triple is neither uniform nor fully distinct.
#[must_use]
pub fn violations(a: &Traits, b: &Traits, c: &Traits) -> Violations {
    Attribute::ALL
        .into_iter()
        .filter(|&attr| !attribute_agrees(a.index_of(attr), b.index_of(attr), c.index_of(attr)))
        .collect()
}

/// Does this triple form a set?
#[must_use]
pub fn is_set(a: &Traits, b: &Traits, c: &Traits) -> bool {
    Attribute::ALL
        .into_iter()
        .all(|attr| attribute_agrees(a.index_of(attr), b.index_of(attr), c.index_of(attr)))
}

/// [`is_set`] over cards.
#[must_use]
pub fn cards_form_set<C>(cards: [&Card<C>; SET_SIZE]) -> bool {
    let [a, b, c] = cards;
    is_set(&a.traits(), &b.traits(), &c.traits())
}

/// The unique card that completes a set with `a` and `b`.
#[must_use]
pub fn complete_set(a: &Traits, b: &Traits) -> Traits {
    // Indices live in 0..3; the third value is equal when a == b and the
    // missing one otherwise, which is (-(a + b)) mod 3 in both cases.
    let third = |x: u8, y: u8| (6 - x - y) % 3;
    Traits::new(
        Shape::ALL[third(a.shape.index(), b.shape.index()) as usize],
        Fill::ALL[third(a.fill.index(), b.fill.index()) as usize],
        Color::ALL[third(a.color.index(), b.color.index()) as usize],
        Count::ALL[third(a.count.index(), b.count.index()) as usize],
    )
}

/// First set found among `cards`, in card order.
#[must_use]
pub fn find_set<'a, C: 'a>(
    cards: impl IntoIterator<Item = &'a Card<C>>,
) -> Option<[CardId; SET_SIZE]> {
    let cards: Vec<&Card<C>> = cards.into_iter().collect();
    let by_traits = index_by_traits(&cards);

    for (i, a) in cards.iter().enumerate() {
        for (j, b) in cards.iter().enumerate().skip(i + 1) {
            let wanted = complete_set(&a.traits(), &b.traits());
            if let Some(&k) = by_traits.get(&wanted) {
                if k > j {
                    return Some([a.id(), b.id(), cards[k].id()]);
                }
            }
        }
    }
    None
}

/// Every set among `cards`, each listed once in card order.
#[must_use]
pub fn find_all_sets<'a, C: 'a>(
    cards: impl IntoIterator<Item = &'a Card<C>>,
) -> Vec<[CardId; SET_SIZE]> {
    let cards: Vec<&Card<C>> = cards.into_iter().collect();
    let by_traits = index_by_traits(&cards);
    let mut sets = Vec::new();

    for (i, a) in cards.iter().enumerate() {
        for (j, b) in cards.iter().enumerate().skip(i + 1) {
            let wanted = complete_set(&a.traits(), &b.traits());
            if let Some(&k) = by_traits.get(&wanted) {
                if k > j {
                    sets.push([a.id(), b.id(), cards[k].id()]);
                }
            }
        }
    }
    sets
}

// Traits are unique within a deck built from the attribute space. Decks
// assembled by hand may repeat traits; the last position wins, which can
// only hide sets that rely on duplicates.
fn index_by_traits<C>(cards: &[&Card<C>]) -> FxHashMap<Traits, usize> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| (card.traits(), i))
        .collect()
}
