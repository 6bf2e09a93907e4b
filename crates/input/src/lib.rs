//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks the
//! keyboard cursor over the card grid. Nothing here touches the game state.

pub mod cursor;
pub mod map;

pub use memory_match_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit};
