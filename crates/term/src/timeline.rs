//! FlipTimeline: the terminal's stand-in for card animations.
//!
//! The engine asks for a reveal; the timeline waits [`FLIP_MS`] of game time
//! and then reports the card as settled so the caller can forward it to
//! `Session::reveal_settled`. The terminal draws every other transition
//! straight from the session snapshot, so those requests need no timing.

use std::collections::BTreeMap;

use crate::core::{AnimationDriver, AnimationRequest};
use crate::types::FLIP_MS;

#[derive(Debug, Clone, Default)]
pub struct FlipTimeline {
    /// Card index -> time left on its reveal.
    reveals: BTreeMap<usize, u32>,
}

impl FlipTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `elapsed_ms`. Returns cards whose reveal finished, in index order.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<usize> {
        let mut settled = Vec::new();
        self.reveals.retain(|&index, left| {
            if *left <= elapsed_ms {
                settled.push(index);
                false
            } else {
                *left -= elapsed_ms;
                true
            }
        });
        settled
    }

    pub fn is_flipping(&self, index: usize) -> bool {
        self.reveals.contains_key(&index)
    }

    /// Drop everything in flight.
    pub fn reset(&mut self) {
        self.reveals.clear();
    }
}

impl AnimationDriver for FlipTimeline {
    fn request(&mut self, request: AnimationRequest) {
        match request {
            AnimationRequest::Reveal(index) => {
                self.reveals.insert(index, FLIP_MS);
            }
            AnimationRequest::FlipBack(index) | AnimationRequest::Remove(index) => {
                self.reveals.remove(&index);
            }
            AnimationRequest::Match(_)
            | AnimationRequest::SetInteractable(..)
            | AnimationRequest::PreviewShow
            | AnimationRequest::PreviewHide => {}
        }
    }
}
