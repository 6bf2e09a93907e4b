//! Move budget - one move per pair of picks
//!
//! The budget only counts down. Reaching zero is terminal until
//! [`MoveBudget::reset`] or a fresh [`MoveBudget::initialize`].

use crate::events::{EventBus, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveBudget {
    total: u32,
    remaining: u32,
    over: bool,
}

impl MoveBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fresh budget of `moves`.
    pub fn initialize(&mut self, moves: u32, events: &EventBus) {
        self.total = moves;
        self.remaining = moves;
        self.over = false;
        events.emit(GameEvent::MovesChanged {
            remaining: self.remaining,
        });
    }

    /// Spend one move.
    ///
    /// No-op once nothing is left. Returns `true` if this call used up the
    /// last move (and `GameOver` was emitted).
    pub fn decrement(&mut self, events: &EventBus) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        events.emit(GameEvent::MovesChanged {
            remaining: self.remaining,
        });

        if self.remaining == 0 {
            self.over = true;
            log::info!("Out of moves ({} used)", self.total);
            events.emit(GameEvent::GameOver);
            return true;
        }
        false
    }

    /// Restore the full budget.
    pub fn reset(&mut self, events: &EventBus) {
        self.remaining = self.total;
        self.over = false;
        events.emit(GameEvent::MovesChanged {
            remaining: self.remaining,
        });
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn used(&self) -> u32 {
        self.total - self.remaining
    }

    pub fn is_over(&self) -> bool {
        self.over
    }
}
