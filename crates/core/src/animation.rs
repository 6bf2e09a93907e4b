//! Animation collaborator
//!
//! The engine asks for animations and never waits on them, with one
//! exception: a [`AnimationRequest::Reveal`] must eventually be answered with
//! `Session::reveal_settled` for the same card, or the card never counts as
//! selected.

use std::cell::RefCell;
use std::rc::Rc;

/// Something the presentation layer should show. Card handles are deck indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationRequest {
    /// Flip face up. Answer with `reveal_settled` once it finishes.
    Reveal(usize),
    FlipBack(usize),
    /// Fade out a matched card.
    Match(usize),
    /// Take the card off the table.
    Remove(usize),
    SetInteractable(usize, bool),
    /// Show every card for the opening preview.
    PreviewShow,
    PreviewHide,
}

pub trait AnimationDriver {
    fn request(&mut self, request: AnimationRequest);
}

/// Ignores every request. Reveals must then be settled by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnimations;

impl AnimationDriver for NoopAnimations {
    fn request(&mut self, _request: AnimationRequest) {}
}

/// Records requests in order; handy in tests.
impl AnimationDriver for Vec<AnimationRequest> {
    fn request(&mut self, request: AnimationRequest) {
        self.push(request);
    }
}

impl<D: AnimationDriver> AnimationDriver for Rc<RefCell<D>> {
    fn request(&mut self, request: AnimationRequest) {
        self.borrow_mut().request(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_records_in_order() {
        let mut log: Vec<AnimationRequest> = Vec::new();
        log.request(AnimationRequest::Reveal(2));
        log.request(AnimationRequest::FlipBack(2));
        assert_eq!(
            log,
            vec![AnimationRequest::Reveal(2), AnimationRequest::FlipBack(2)]
        );
    }

    #[test]
    fn test_shared_driver() {
        let shared = Rc::new(RefCell::new(Vec::new()));
        let mut driver: Box<dyn AnimationDriver> = Box::new(Rc::clone(&shared));
        driver.request(AnimationRequest::PreviewShow);
        assert_eq!(*shared.borrow(), vec![AnimationRequest::PreviewShow]);
    }
}
