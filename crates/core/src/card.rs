//! Card module - logical state of a single card
//!
//! A card never animates itself. `select` only asks for a reveal; the
//! presentation layer plays the flip and reports back through
//! [`Card::complete_reveal`], which is the card's one "selection completed"
//! signal.

use serde::{Deserialize, Serialize};

use crate::types::CardState;

/// One card on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Pair key. Two cards share it exactly when they form a pair.
    pair: u32,
    /// Index of the front-face asset (`pair mod face_pool`).
    face: u32,
    state: CardState,
    /// Taken off the table after its match settled.
    removed: bool,
}

impl Card {
    /// Create a face-down card
    pub fn new(pair: u32, face: u32) -> Self {
        Self {
            pair,
            face,
            state: CardState::Hidden,
            removed: false,
        }
    }

    pub fn pair(&self) -> u32 {
        self.pair
    }

    pub fn face(&self) -> u32 {
        self.face
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Face up, on its way up, or matched.
    pub fn is_flipped(&self) -> bool {
        self.state != CardState::Hidden
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Whether `other` completes a pair with this card.
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.pair == other.pair
    }

    /// Begin a reveal.
    ///
    /// Returns `false` (and changes nothing) unless the card is face down.
    pub fn select(&mut self) -> bool {
        if self.removed || self.state != CardState::Hidden {
            return false;
        }
        self.state = CardState::Flipping;
        true
    }

    /// The reveal transition settled.
    ///
    /// Returns `true` exactly once per successful [`Card::select`]; that is the
    /// moment the card counts as selected.
    pub fn complete_reveal(&mut self) -> bool {
        if self.state != CardState::Flipping {
            return false;
        }
        self.state = CardState::Revealed;
        true
    }

    /// Turn the card face down again. Matched cards stay put.
    pub fn flip_back(&mut self) -> bool {
        match self.state {
            CardState::Matched | CardState::Hidden => false,
            CardState::Flipping | CardState::Revealed => {
                self.state = CardState::Hidden;
                true
            }
        }
    }

    /// Mark the card matched. Idempotent.
    pub fn match_card(&mut self) {
        self.state = CardState::Matched;
    }

    pub(crate) fn remove(&mut self) -> bool {
        if self.removed {
            return false;
        }
        self.removed = true;
        true
    }

    /// Force a card face up during the opening preview without selecting it.
    pub(crate) fn set_preview(&mut self, shown: bool) {
        if self.is_matched() || self.removed {
            return;
        }
        self.state = if shown {
            CardState::Revealed
        } else {
            CardState::Hidden
        };
    }
}
