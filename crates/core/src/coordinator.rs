//! Comparison coordinator - pairs selections and resolves them one at a time
//!
//! Selected cards collect in a pending set of at most two. A full set becomes
//! a [`SelectionPair`], costs one move, and joins a FIFO queue. Only the head of
//! the queue is ever being compared; its settle delay (fade-out on a match,
//! face-up pause on a mismatch) runs to completion before the next pair is
//! looked at, so a fast third pick can never disturb a pair in flight.
//!
//! Delays advance through [`Coordinator::tick`], driven by the same
//! fixed-timestep loop as everything else.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::animation::{AnimationDriver, AnimationRequest};
use crate::board::Board;
use crate::events::{EventBus, GameEvent};
use crate::moves::MoveBudget;
use crate::score::ScoreEngine;
use crate::stats::StatsReporter;
use crate::types::{MATCH_SETTLE_MS, MISMATCH_FLIP_BACK_MS};

/// Two cards waiting to be compared, by deck index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionPair {
    pub first: usize,
    pub second: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Why a selection was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    UnknownCard,
    /// Already matched or taken off the table.
    Matched,
    /// The same card reported twice before its pair was formed.
    AlreadyPending,
    NoMovesLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    /// First card of a pair.
    Pending,
    /// A pair was formed and queued.
    Queued(SelectionPair),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Settling {
        pair: SelectionPair,
        verdict: Verdict,
        remaining_ms: u32,
    },
}

/// Everything a comparison touches, borrowed from the owning session.
pub struct Table<'a> {
    pub board: &'a mut Board,
    pub score: &'a mut ScoreEngine,
    pub moves: &'a mut MoveBudget,
    pub events: &'a EventBus,
    pub stats: &'a mut dyn StatsReporter,
    pub animations: &'a mut dyn AnimationDriver,
}

#[derive(Debug, Clone)]
pub struct Coordinator {
    pending: ArrayVec<usize, 2>,
    queue: VecDeque<SelectionPair>,
    phase: Phase,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            pending: ArrayVec::new(),
            queue: VecDeque::new(),
            phase: Phase::Idle,
        }
    }

    /// Drop all pending and queued work (round teardown).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.queue.clear();
        self.phase = Phase::Idle;
    }

    pub fn is_comparing(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn queued_pairs(&self) -> usize {
        self.queue.len()
    }

    /// The pair currently being resolved, if any.
    pub fn active(&self) -> Option<(SelectionPair, Verdict)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Settling { pair, verdict, .. } => Some((pair, verdict)),
        }
    }

    pub fn settle_remaining_ms(&self) -> u32 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Settling { remaining_ms, .. } => remaining_ms,
        }
    }

    /// A card finished revealing.
    pub fn on_card_selected(&mut self, card: usize, table: &mut Table<'_>) -> SelectOutcome {
        let Some(state) = table.board.card(card) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        if state.is_matched() || state.is_removed() {
            return SelectOutcome::Ignored(IgnoreReason::Matched);
        }
        if self.pending.contains(&card) {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyPending);
        }
        if table.moves.is_over() {
            return SelectOutcome::Ignored(IgnoreReason::NoMovesLeft);
        }

        self.pending.push(card);
        if !self.pending.is_full() {
            return SelectOutcome::Pending;
        }

        let pair = SelectionPair {
            first: self.pending[0],
            second: self.pending[1],
        };
        self.pending.clear();
        table.moves.decrement(table.events);
        self.queue.push_back(pair);
        log::debug!(
            "Queued pair ({}, {}), {} waiting",
            pair.first,
            pair.second,
            self.queue.len()
        );

        if self.phase == Phase::Idle {
            self.process_next(table);
        }
        SelectOutcome::Queued(pair)
    }

    /// Advance the active settle delay.
    ///
    /// Leftover time carries into the next queued comparison. Returns `true`
    /// when this tick cleared the board.
    pub fn tick(&mut self, elapsed_ms: u32, table: &mut Table<'_>) -> bool {
        let mut left = elapsed_ms;
        loop {
            let Phase::Settling {
                pair,
                verdict,
                remaining_ms,
            } = self.phase
            else {
                return false;
            };

            if left < remaining_ms {
                self.phase = Phase::Settling {
                    pair,
                    verdict,
                    remaining_ms: remaining_ms - left,
                };
                return false;
            }
            left -= remaining_ms;

            if self.settle(pair, verdict, table) {
                return true;
            }
        }
    }

    /// Start on the next queued pair, or go idle.
    fn process_next(&mut self, table: &mut Table<'_>) {
        while let Some(pair) = self.queue.pop_front() {
            if self.is_stale(pair, table.board) {
                log::debug!(
                    "Discarding stale pair ({}, {}): a card was already matched",
                    pair.first,
                    pair.second
                );
                for index in [pair.first, pair.second] {
                    flip_back(index, table);
                }
                continue;
            }
            self.evaluate(pair, table);
            return;
        }
        self.phase = Phase::Idle;
    }

    fn is_stale(&self, pair: SelectionPair, board: &Board) -> bool {
        [pair.first, pair.second].iter().any(|&i| {
            board
                .card(i)
                .map_or(true, |c| c.is_matched() || c.is_removed())
        })
    }

    fn evaluate(&mut self, pair: SelectionPair, table: &mut Table<'_>) {
        let is_match = match (table.board.card(pair.first), table.board.card(pair.second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        if is_match {
            for index in [pair.first, pair.second] {
                if let Some(card) = table.board.card_mut(index) {
                    card.match_card();
                }
                table.animations.request(AnimationRequest::Match(index));
                table
                    .animations
                    .request(AnimationRequest::SetInteractable(index, false));
            }
            table.board.record_match();
            table.stats.record_match();
            let points = table.score.add_match_points(table.events);
            log::info!(
                "Pair ({}, {}) matched for {} points, combo {}",
                pair.first,
                pair.second,
                points.total,
                points.combo
            );
            table.events.emit(GameEvent::PairMatched {
                first: pair.first,
                second: pair.second,
            });
            self.phase = Phase::Settling {
                pair,
                verdict: Verdict::Match,
                remaining_ms: MATCH_SETTLE_MS,
            };
        } else {
            log::debug!("Pair ({}, {}) mismatched", pair.first, pair.second);
            table.score.reset_combo(table.events, &mut *table.stats);
            table.events.emit(GameEvent::PairMismatched {
                first: pair.first,
                second: pair.second,
            });
            self.phase = Phase::Settling {
                pair,
                verdict: Verdict::Mismatch,
                remaining_ms: MISMATCH_FLIP_BACK_MS,
            };
        }
    }

    /// The settle delay of the active pair ran out.
    fn settle(&mut self, pair: SelectionPair, verdict: Verdict, table: &mut Table<'_>) -> bool {
        match verdict {
            Verdict::Match => {
                for index in [pair.first, pair.second] {
                    if table.board.remove(index) {
                        table.animations.request(AnimationRequest::Remove(index));
                    }
                }
                if table.board.is_cleared() {
                    self.clear();
                    log::info!(
                        "Board cleared with {} pairs matched",
                        table.board.matched_pairs()
                    );
                    table.events.emit(GameEvent::GameWon);
                    return true;
                }
            }
            Verdict::Mismatch => {
                for index in [pair.first, pair.second] {
                    flip_back(index, table);
                }
            }
        }
        self.process_next(table);
        false
    }
}

fn flip_back(index: usize, table: &mut Table<'_>) {
    if let Some(card) = table.board.card_mut(index) {
        if card.flip_back() {
            table.animations.request(AnimationRequest::FlipBack(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::stats::GameStats;
    use crate::types::CardState;

    /// Owns everything a [`Table`] borrows.
    struct Fixture {
        board: Board,
        score: ScoreEngine,
        moves: MoveBudget,
        events: EventBus,
        stats: GameStats,
        animations: Vec<AnimationRequest>,
        coordinator: Coordinator,
    }

    impl Fixture {
        /// Cards laid out with the given pair keys.
        fn new(pairs: &[u32], moves: u32) -> Self {
            let cards: Vec<Card> = pairs.iter().map(|&p| Card::new(p, p)).collect();
            let columns = cards.len() as u16;
            let events = EventBus::new();
            let mut budget = MoveBudget::new();
            budget.initialize(moves, &events);
            Self {
                board: Board::new(1, columns, cards),
                score: ScoreEngine::new(),
                moves: budget,
                events,
                stats: GameStats::new(),
                animations: Vec::new(),
                coordinator: Coordinator::new(),
            }
        }

        fn reveal(&mut self, index: usize) -> SelectOutcome {
            if let Some(card) = self.board.card_mut(index) {
                card.select();
                card.complete_reveal();
            }
            let mut table = Table {
                board: &mut self.board,
                score: &mut self.score,
                moves: &mut self.moves,
                events: &self.events,
                stats: &mut self.stats,
                animations: &mut self.animations,
            };
            self.coordinator.on_card_selected(index, &mut table)
        }

        fn tick(&mut self, elapsed_ms: u32) -> bool {
            let mut table = Table {
                board: &mut self.board,
                score: &mut self.score,
                moves: &mut self.moves,
                events: &self.events,
                stats: &mut self.stats,
                animations: &mut self.animations,
            };
            self.coordinator.tick(elapsed_ms, &mut table)
        }

        fn state(&self, index: usize) -> CardState {
            self.board.card(index).unwrap().state()
        }
    }

    #[test]
    fn test_first_pick_is_pending() {
        let mut fx = Fixture::new(&[0, 0, 1, 1], 8);
        assert_eq!(fx.reveal(0), SelectOutcome::Pending);
        assert_eq!(fx.coordinator.pending(), &[0]);
        assert!(!fx.coordinator.is_comparing());
        assert_eq!(fx.moves.remaining(), 8);
    }

    #[test]
    fn test_duplicate_selection_is_ignored() {
        let mut fx = Fixture::new(&[0, 0, 1, 1], 8);
        fx.reveal(0);
        let mut table = Table {
            board: &mut fx.board,
            score: &mut fx.score,
            moves: &mut fx.moves,
            events: &fx.events,
            stats: &mut fx.stats,
            animations: &mut fx.animations,
        };
        assert_eq!(
            fx.coordinator.on_card_selected(0, &mut table),
            SelectOutcome::Ignored(IgnoreReason::AlreadyPending)
        );
        assert_eq!(fx.coordinator.pending().len(), 1);
    }

    #[test]
    fn test_pair_costs_one_move() {
        let mut fx = Fixture::new(&[0, 0, 1, 1], 8);
        fx.reveal(0);
        assert_eq!(
            fx.reveal(1),
            SelectOutcome::Queued(SelectionPair {
                first: 0,
                second: 1
            })
        );
        assert_eq!(fx.moves.remaining(), 7);
        assert!(fx.coordinator.pending().is_empty());
    }

    #[test]
    fn test_match_settles_then_removes() {
        let mut fx = Fixture::new(&[0, 0, 1, 1], 8);
        fx.reveal(0);
        fx.reveal(1);

        assert!(fx.coordinator.is_comparing());
        assert_eq!(fx.state(0), CardState::Matched);
        assert_eq!(fx.state(1), CardState::Matched);
        assert_eq!(fx.score.score(), 10);
        assert_eq!(fx.score.combo(), 1);
        assert_eq!(fx.board.matched_pairs(), 1);
        assert_eq!(fx.stats.total_matches, 1);

        // Still on the table while fading.
        assert!(!fx.tick(MATCH_SETTLE_MS - 1));
        assert_eq!(fx.board.live_count(), 4);

        assert!(!fx.tick(1));
        assert_eq!(fx.board.live_count(), 2);
        assert!(!fx.coordinator.is_comparing());
        assert!(fx.animations.contains(&AnimationRequest::Remove(0)));
        assert!(fx.animations.contains(&AnimationRequest::Remove(1)));
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let mut fx = Fixture::new(&[0, 1, 0, 1], 8);
        fx.reveal(0);
        fx.reveal(1);

        assert_eq!(
            fx.coordinator.active(),
            Some((
                SelectionPair {
                    first: 0,
                    second: 1
                },
                Verdict::Mismatch
            ))
        );
        fx.tick(MISMATCH_FLIP_BACK_MS - 16);
        assert_eq!(fx.state(0), CardState::Revealed);

        fx.tick(16);
        assert_eq!(fx.state(0), CardState::Hidden);
        assert_eq!(fx.state(1), CardState::Hidden);
        assert!(!fx.coordinator.is_comparing());
        assert_eq!(fx.score.combo(), 0);
        assert!(fx.animations.contains(&AnimationRequest::FlipBack(0)));
    }

    #[test]
    fn test_mismatch_breaks_combo() {
        let mut fx = Fixture::new(&[0, 0, 1, 2, 1, 2], 8);
        fx.reveal(0);
        fx.reveal(1);
        fx.tick(MATCH_SETTLE_MS);
        assert_eq!(fx.score.combo(), 1);

        fx.reveal(2);
        fx.reveal(3);
        assert_eq!(fx.score.combo(), 0);
        assert_eq!(fx.stats.max_combo, 1);
    }

    #[test]
    fn test_queue_is_fifo_and_serialized() {
        let mut fx = Fixture::new(&[0, 1, 0, 1, 2, 2], 8);
        // First pair mismatches and occupies the coordinator.
        fx.reveal(0);
        fx.reveal(1);
        // Second pair arrives while the first is still face up.
        fx.reveal(4);
        fx.reveal(5);

        assert_eq!(fx.coordinator.queued_pairs(), 1);
        assert_eq!(fx.moves.remaining(), 6);
        // The queued match has not been evaluated yet.
        assert_eq!(fx.state(4), CardState::Revealed);
        assert_eq!(fx.score.score(), 0);

        fx.tick(MISMATCH_FLIP_BACK_MS);
        assert_eq!(fx.state(0), CardState::Hidden);
        assert_eq!(fx.state(4), CardState::Matched);
        assert_eq!(fx.score.score(), 10);
        assert_eq!(fx.coordinator.queued_pairs(), 0);
        assert!(fx.coordinator.is_comparing());
    }

    #[test]
    fn test_leftover_time_carries_into_next_pair() {
        let mut fx = Fixture::new(&[0, 1, 0, 1, 2, 2], 8);
        fx.reveal(0);
        fx.reveal(1);
        fx.reveal(4);
        fx.reveal(5);

        fx.tick(MISMATCH_FLIP_BACK_MS + MATCH_SETTLE_MS);
        assert!(!fx.coordinator.is_comparing());
        assert_eq!(fx.board.live_count(), 4);
    }

    #[test]
    fn test_clearing_the_board_wins() {
        let mut fx = Fixture::new(&[0, 0], 8);
        let won = std::rc::Rc::new(std::cell::Cell::new(false));
        let flag = std::rc::Rc::clone(&won);
        fx.events
            .subscribe(crate::events::EventKind::GameWon, move |_| flag.set(true));

        fx.reveal(0);
        fx.reveal(1);
        assert!(!won.get());
        assert!(fx.tick(MATCH_SETTLE_MS));
        assert!(won.get());
        assert!(fx.board.is_cleared());
        assert!(!fx.coordinator.is_comparing());
    }

    #[test]
    fn test_stale_pair_is_discarded() {
        let mut fx = Fixture::new(&[0, 1, 0, 1], 8);
        fx.reveal(0);
        fx.reveal(1);
        fx.reveal(2);
        fx.reveal(3);
        assert_eq!(fx.coordinator.queued_pairs(), 1);

        // Some other flow matched card 2 before its pair was dequeued.
        fx.board.card_mut(2).unwrap().match_card();

        fx.tick(MISMATCH_FLIP_BACK_MS);
        assert!(!fx.coordinator.is_comparing());
        assert_eq!(fx.board.matched_pairs(), 0);
        assert_eq!(fx.score.score(), 0);
        // The unmatched member goes face down again.
        assert_eq!(fx.state(3), CardState::Hidden);
    }

    #[test]
    fn test_matched_card_is_ignored() {
        let mut fx = Fixture::new(&[0, 0, 1, 1], 8);
        fx.reveal(0);
        fx.reveal(1);
        assert_eq!(
            fx.reveal(0),
            SelectOutcome::Ignored(IgnoreReason::Matched)
        );
        assert_eq!(
            fx.reveal(42),
            SelectOutcome::Ignored(IgnoreReason::UnknownCard)
        );
    }

    #[test]
    fn test_no_moves_left_ignores_selection() {
        let mut fx = Fixture::new(&[0, 1, 0, 1], 1);
        fx.reveal(0);
        fx.reveal(1);
        assert!(fx.moves.is_over());
        assert_eq!(
            fx.reveal(2),
            SelectOutcome::Ignored(IgnoreReason::NoMovesLeft)
        );
        assert!(fx.coordinator.pending().is_empty());
    }

    #[test]
    fn test_pending_never_exceeds_two() {
        let mut fx = Fixture::new(&[0, 1, 2, 0, 1, 2], 8);
        for i in 0..6 {
            fx.reveal(i);
            assert!(fx.coordinator.pending().len() < 2);
        }
        assert_eq!(fx.moves.remaining(), 5);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut fx = Fixture::new(&[0, 1, 0, 1], 8);
        fx.reveal(0);
        fx.reveal(1);
        fx.reveal(2);
        fx.coordinator.clear();
        assert!(!fx.coordinator.is_comparing());
        assert!(fx.coordinator.pending().is_empty());
        assert_eq!(fx.coordinator.queued_pairs(), 0);
        assert_eq!(fx.coordinator.settle_remaining_ms(), 0);
    }
}
