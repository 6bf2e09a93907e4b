//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of the card-matching game: dealing, selection,
//! pair comparison, scoring, and the move budget. It does no I/O and owns no
//! clock; the caller drives time through [`Session::tick`].
//!
//! # Module Structure
//!
//! - [`card`]: a single card and its state transitions
//! - [`deck`]: grid validation, pair assignment, and the seeded shuffle
//! - [`board`]: the dealt cards of one round
//! - [`coordinator`]: pending selection, FIFO pair queue, and settle delays
//! - [`score`]: match points and combo streaks
//! - [`moves`]: the per-round move budget
//! - [`events`]: synchronous event bus for HUD and other listeners
//! - [`stats`]: cross-round statistics sink
//! - [`animation`]: presentation requests emitted by the engine
//! - [`session`]: one round from deal to win or loss
//! - [`snapshot`]: serializable read-only view of a session
//!
//! # Flow
//!
//! 1. [`Session::start`] deals a shuffled grid (optionally behind a preview).
//! 2. [`Session::select`] turns a hidden card and asks the front end to animate it.
//! 3. When the animation lands, [`Session::reveal_settled`] counts the card as
//!    picked. Every second pick forms a pair and spends one move.
//! 4. Pairs are compared one at a time, in the order they were formed. A match
//!    scores immediately and is removed after [`MATCH_SETTLE_MS`]; a mismatch
//!    flips back after [`MISMATCH_FLIP_BACK_MS`].
//! 5. Clearing the board wins; running out of moves with nothing left to
//!    resolve loses.
//!
//! [`MATCH_SETTLE_MS`]: types::MATCH_SETTLE_MS
//! [`MISMATCH_FLIP_BACK_MS`]: types::MISMATCH_FLIP_BACK_MS
//!
//! # Example
//!
//! ```
//! use memory_match_core::{Session, SessionConfig};
//! use memory_match_core::types::{RoundStatus, MATCH_SETTLE_MS};
//!
//! let config = SessionConfig::default()
//!     .with_grid(1, 2)
//!     .with_preview_ms(0)
//!     .with_seed(7);
//! let mut session = Session::headless(config);
//! session.start().unwrap();
//!
//! for card in 0..2 {
//!     session.select(card);
//!     session.reveal_settled(card);
//! }
//! session.tick(MATCH_SETTLE_MS);
//!
//! assert_eq!(session.status(), RoundStatus::Won);
//! assert_eq!(session.score(), 10);
//! ```

pub mod animation;
pub mod board;
pub mod card;
pub mod coordinator;
pub mod deck;
pub mod events;
pub mod moves;
pub mod score;
pub mod session;
pub mod snapshot;
pub mod stats;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use animation::{AnimationDriver, AnimationRequest, NoopAnimations};
pub use board::Board;
pub use card::Card;
pub use coordinator::{Coordinator, IgnoreReason, SelectOutcome, SelectionPair, Table, Verdict};
pub use deck::{build_deck, shuffle, validate_grid, DeckRng, GridError};
pub use events::{EventBus, EventKind, GameEvent, SubscriptionId};
pub use moves::MoveBudget;
pub use score::{combo_bonus, MatchPoints, ScoreEngine};
pub use session::{Session, SessionConfig, DEFAULT_FACE_POOL};
pub use snapshot::{CardSnapshot, SessionSnapshot};
pub use stats::{GameStats, NoopStats, StatsReporter};
