//! Grid session - owns one round from deal to win or loss
//!
//! The session builds the deck, routes each card's "reveal settled" signal to
//! the [`Coordinator`], runs the opening preview, and decides when the round is
//! over. It is single-threaded: the presentation layer calls [`Session::select`],
//! [`Session::reveal_settled`], and [`Session::tick`] from one loop.

use std::fmt;

use crate::animation::{AnimationDriver, AnimationRequest, NoopAnimations};
use crate::board::Board;
use crate::coordinator::{Coordinator, SelectOutcome, Table};
use crate::deck::{build_deck, deck_rng, DeckRng, GridError};
use crate::events::{EventBus, GameEvent};
use crate::moves::MoveBudget;
use crate::score::ScoreEngine;
use crate::snapshot::{CardSnapshot, SessionSnapshot};
use crate::stats::{NoopStats, StatsReporter};
use crate::types::{Difficulty, RoundStatus};

/// Number of distinct front faces shipped with the game.
pub const DEFAULT_FACE_POOL: u32 = 18;

/// Round configuration supplied by the difficulty selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: u16,
    pub columns: u16,
    /// Move budget; `0` disables the budget.
    pub moves: u32,
    /// Number of front-face assets available.
    pub face_pool: u32,
    /// Opening preview length; `0` skips the preview.
    pub preview_ms: u32,
    /// Shuffle seed; `None` picks one at random.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (rows, columns) = difficulty.grid();
        Self {
            rows,
            columns,
            moves: difficulty.moves(),
            face_pool: DEFAULT_FACE_POOL,
            preview_ms: difficulty.preview_ms(),
            seed: None,
        }
    }

    pub fn with_grid(mut self, rows: u16, columns: u16) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_moves(mut self, moves: u32) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_preview_ms(mut self, preview_ms: u32) -> Self {
        self.preview_ms = preview_ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_face_pool(mut self, face_pool: u32) -> Self {
        self.face_pool = face_pool;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

pub struct Session {
    config: SessionConfig,
    board: Board,
    coordinator: Coordinator,
    score: ScoreEngine,
    moves: MoveBudget,
    events: EventBus,
    stats: Box<dyn StatsReporter>,
    animations: Box<dyn AnimationDriver>,
    rng: DeckRng,
    status: RoundStatus,
    preview_remaining_ms: u32,
    /// Monotonic round id (increments on every successful deal).
    round_id: u32,
}

impl Session {
    /// Create a session with injected collaborators. No grid is dealt yet.
    pub fn new(
        config: SessionConfig,
        stats: impl StatsReporter + 'static,
        animations: impl AnimationDriver + 'static,
    ) -> Self {
        let rng = deck_rng(config.seed);
        Self {
            config,
            board: Board::default(),
            coordinator: Coordinator::new(),
            score: ScoreEngine::new(),
            moves: MoveBudget::new(),
            events: EventBus::new(),
            stats: Box::new(stats),
            animations: Box::new(animations),
            rng,
            status: RoundStatus::Uninitialized,
            preview_remaining_ms: 0,
            round_id: 0,
        }
    }

    /// A session that reports nowhere and animates nothing.
    pub fn headless(config: SessionConfig) -> Self {
        Self::new(config, NoopStats, NoopAnimations)
    }

    /// Subscribe here for score, combo, move, and round events.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves.remaining()
    }

    pub fn is_out_of_moves(&self) -> bool {
        self.moves.is_over()
    }

    pub fn matched_pairs(&self) -> u32 {
        self.board.matched_pairs()
    }

    pub fn is_comparing(&self) -> bool {
        self.coordinator.is_comparing()
    }

    pub fn is_preview_active(&self) -> bool {
        self.status == RoundStatus::Preview
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Deal the configured grid.
    pub fn start(&mut self) -> Result<(), GridError> {
        self.initialize_grid(self.config.rows, self.config.columns)
    }

    /// Deal a fresh shuffle of the current grid with a full move budget.
    pub fn restart(&mut self) -> Result<(), GridError> {
        self.start()
    }

    /// Tear down the current round and deal a new `rows x columns` grid.
    ///
    /// On error nothing changes: the previous round (or the uninitialized
    /// state) stays as it was.
    pub fn initialize_grid(&mut self, rows: u16, columns: u16) -> Result<(), GridError> {
        let cards = match build_deck(rows, columns, self.config.face_pool, &mut self.rng) {
            Ok(cards) => cards,
            Err(err) => {
                log::error!("{}", err);
                return Err(err);
            }
        };

        self.teardown();
        self.config.rows = rows;
        self.config.columns = columns;
        self.board = Board::new(rows, columns, cards);
        self.round_id = self.round_id.wrapping_add(1);

        self.moves.initialize(self.config.moves, &self.events);
        self.score.reset_round(&self.events);
        self.events.emit(GameEvent::RoundStarted { rows, columns });
        log::info!(
            "Round {} dealt: {}x{} grid, {} moves",
            self.round_id,
            rows,
            columns,
            self.config.moves
        );

        if self.config.preview_ms > 0 {
            self.status = RoundStatus::Preview;
            self.preview_remaining_ms = self.config.preview_ms;
            for card in self.board.cards_mut() {
                card.set_preview(true);
            }
            self.animations.request(AnimationRequest::PreviewShow);
        } else {
            self.status = RoundStatus::Playing;
            self.preview_remaining_ms = 0;
        }
        Ok(())
    }

    fn teardown(&mut self) {
        let live: Vec<usize> = self.board.live_indices().collect();
        for index in live {
            self.animations.request(AnimationRequest::Remove(index));
        }
        self.coordinator.clear();
        self.board = Board::default();
        self.status = RoundStatus::Uninitialized;
    }

    /// The player picked a card. Returns `true` if a reveal was requested.
    pub fn select(&mut self, card: usize) -> bool {
        if self.status != RoundStatus::Playing || self.moves.is_over() {
            return false;
        }
        let Some(target) = self.board.card_mut(card) else {
            return false;
        };
        if !target.select() {
            return false;
        }
        self.animations.request(AnimationRequest::Reveal(card));
        true
    }

    /// A reveal animation finished; the card now counts as selected.
    ///
    /// Returns `true` if the card joined the pending selection. A card that
    /// settles after the round stopped taking picks is turned face down again.
    pub fn reveal_settled(&mut self, card: usize) -> bool {
        let Some(target) = self.board.card_mut(card) else {
            return false;
        };
        if !target.complete_reveal() {
            return false;
        }
        if self.status != RoundStatus::Playing {
            log::debug!("Card {} settled after the round ended", card);
            self.drop_reveal(card);
            return false;
        }

        let outcome = {
            let (coordinator, mut table) = self.parts();
            coordinator.on_card_selected(card, &mut table)
        };
        let accepted = !matches!(outcome, SelectOutcome::Ignored(_));
        if let SelectOutcome::Ignored(reason) = outcome {
            log::debug!("Selection of card {} ignored: {:?}", card, reason);
            self.drop_reveal(card);
        }
        self.check_round_end();
        accepted
    }

    fn drop_reveal(&mut self, card: usize) {
        if let Some(target) = self.board.card_mut(card) {
            if target.flip_back() {
                self.animations.request(AnimationRequest::FlipBack(card));
            }
        }
    }

    /// Advance the preview window and any settle delay.
    pub fn tick(&mut self, elapsed_ms: u32) {
        match self.status {
            RoundStatus::Preview => {
                if elapsed_ms >= self.preview_remaining_ms {
                    self.end_preview();
                } else {
                    self.preview_remaining_ms -= elapsed_ms;
                }
            }
            RoundStatus::Playing => {
                let won = {
                    let (coordinator, mut table) = self.parts();
                    coordinator.tick(elapsed_ms, &mut table)
                };
                if won {
                    self.finish(RoundStatus::Won);
                } else {
                    self.check_round_end();
                }
            }
            RoundStatus::Uninitialized | RoundStatus::Won | RoundStatus::Lost => {}
        }
    }

    fn end_preview(&mut self) {
        self.preview_remaining_ms = 0;
        for card in self.board.cards_mut() {
            card.set_preview(false);
        }
        self.animations.request(AnimationRequest::PreviewHide);
        self.status = RoundStatus::Playing;
        self.events.emit(GameEvent::PreviewEnded);
    }

    /// Out of moves with nothing left to resolve means the round is lost.
    fn check_round_end(&mut self) {
        if self.status == RoundStatus::Playing
            && self.moves.is_over()
            && !self.coordinator.is_comparing()
            && !self.board.is_cleared()
        {
            self.finish(RoundStatus::Lost);
        }
    }

    fn finish(&mut self, status: RoundStatus) {
        self.status = status;
        self.score.finish_game(&self.events, self.stats.as_mut());
        let live: Vec<usize> = self.board.live_indices().collect();
        for index in live {
            self.animations
                .request(AnimationRequest::SetInteractable(index, false));
        }
        log::info!(
            "Round {} {}: score {}, {} of {} pairs",
            self.round_id,
            status.as_str(),
            self.score.score(),
            self.board.matched_pairs(),
            self.board.pair_count()
        );
    }

    fn parts(&mut self) -> (&mut Coordinator, Table<'_>) {
        (
            &mut self.coordinator,
            Table {
                board: &mut self.board,
                score: &mut self.score,
                moves: &mut self.moves,
                events: &self.events,
                stats: self.stats.as_mut(),
                animations: self.animations.as_mut(),
            },
        )
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            round_id: self.round_id,
            status: self.status,
            rows: self.board.rows(),
            columns: self.board.columns(),
            score: self.score.score(),
            combo: self.score.combo(),
            moves_total: self.moves.total(),
            moves_remaining: self.moves.remaining(),
            matched_pairs: self.board.matched_pairs(),
            pair_count: self.board.pair_count() as u32,
            live_cards: self.board.live_count() as u32,
            comparing: self.coordinator.is_comparing(),
            queued_pairs: self.coordinator.queued_pairs() as u32,
            preview_remaining_ms: self.preview_remaining_ms,
            cards: self.board.cards().iter().map(CardSnapshot::from).collect(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("round_id", &self.round_id)
            .field("board", &self.board)
            .field("coordinator", &self.coordinator)
            .field("score", &self.score)
            .field("moves", &self.moves)
            .finish_non_exhaustive()
    }
}
