//! Match evaluation.
//!
//! Pure functions over card traits. The engine calls `violations` when a
//! selection reaches three cards; `find_set` backs the hint projection.
//! `cards_form_set` is the yes/no check for callers holding cards.

pub mod matching;

pub use matching::{
    attribute_agrees, cards_form_set, complete_set, find_all_sets, find_set, is_set, violations,
    Violations, SET_SIZE,
};
