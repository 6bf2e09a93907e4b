//! Board module - the live card collection of one round
//!
//! Cards keep their deck index for the whole round; a matched pair is
//! removed by flagging, so indices handed to the presentation layer stay valid.

use crate::card::Card;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    rows: u16,
    columns: u16,
    cards: Vec<Card>,
    /// Cards still on the table.
    live: usize,
    matched_pairs: u32,
}

impl Board {
    /// Lay out a dealt deck in row-major order.
    pub fn new(rows: u16, columns: u16, cards: Vec<Card>) -> Self {
        debug_assert_eq!(cards.len(), rows as usize * columns as usize);
        let live = cards.iter().filter(|c| !c.is_removed()).count();
        Self {
            rows,
            columns,
            cards,
            live,
            matched_pairs: 0,
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub(crate) fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Indices of cards still on the table.
    pub fn live_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_removed())
            .map(|(i, _)| i)
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Every card has been matched and taken away.
    pub fn is_cleared(&self) -> bool {
        !self.cards.is_empty() && self.live == 0
    }

    pub(crate) fn record_match(&mut self) {
        self.matched_pairs += 1;
    }

    pub(crate) fn remove(&mut self, index: usize) -> bool {
        let removed = self.cards.get_mut(index).map_or(false, Card::remove);
        if removed {
            self.live -= 1;
        }
        removed
    }

    /// `(row, column)` of a deck index.
    pub fn position(&self, index: usize) -> Option<(u16, u16)> {
        if index >= self.cards.len() || self.columns == 0 {
            return None;
        }
        let columns = self.columns as usize;
        Some(((index / columns) as u16, (index % columns) as u16))
    }

    /// Deck index at `(row, column)`.
    pub fn index_at(&self, row: u16, column: u16) -> Option<usize> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }
}
