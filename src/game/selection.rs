//! The in-progress selection: up to three distinct hand cards, in the order
//! they were chosen.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::rules::SET_SIZE;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    // SmallVec keeps the at-most-three ids inline.
    ids: SmallVec<[CardId; SET_SIZE]>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.ids.len() >= SET_SIZE
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CardId] {
        &self.ids
    }

    /// Add a card. Returns `false` if it is already present or the
    /// selection is full.
    pub(crate) fn push(&mut self, id: CardId) -> bool {
        if self.is_full() || self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove a card, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: CardId) -> bool {
        match self.ids.iter().position(|&c| c == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empty the selection, returning what it held.
    pub(crate) fn take(&mut self) -> SmallVec<[CardId; SET_SIZE]> {
        std::mem::take(&mut self.ids)
    }
}
