//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the engine, the terminal view,
//! and tests alike.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FLIP_MS` | 300 | Reveal / flip-back animation length |
//! | `MATCH_SETTLE_MS` | 500 | Fade-out of a matched pair before removal |
//! | `MISMATCH_FLIP_BACK_MS` | 1000 | How long a mismatched pair stays face up |
//!
//! # Scoring
//!
//! Every match is worth [`POINTS_PER_MATCH`]. Consecutive matches build a combo;
//! from the second match of a streak on, `(combo - 1) * COMBO_MULTIPLIER` bonus
//! points are added. Any mismatch breaks the streak.
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{Difficulty, GameAction};
//!
//! let difficulty = Difficulty::from_index(7);
//! assert_eq!(difficulty, Difficulty::Expert);
//! assert_eq!(difficulty.grid(), (6, 6));
//!
//! let action = GameAction::from_str("flip").unwrap();
//! assert_eq!(action, GameAction::Flip);
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Length of a card flip animation.
pub const FLIP_MS: u32 = 300;

/// Fade-out time of a matched pair before both cards leave the table.
pub const MATCH_SETTLE_MS: u32 = 500;

/// How long a mismatched pair stays revealed before flipping back.
pub const MISMATCH_FLIP_BACK_MS: u32 = 1000;

/// Base points awarded for every match.
pub const POINTS_PER_MATCH: u32 = 10;

/// Bonus per combo step beyond the first match of a streak.
pub const COMBO_MULTIPLIER: u32 = 5;

/// Default grid used when nothing else is configured.
pub const DEFAULT_ROWS: u16 = 4;
pub const DEFAULT_COLUMNS: u16 = 4;

/// Logical state of a single card.
///
/// The cycle is `Hidden -> Flipping -> Revealed -> Hidden`, or
/// `Revealed -> Matched`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    #[default]
    Hidden,
    /// Reveal requested; waiting for the presentation layer to settle it.
    Flipping,
    Revealed,
    Matched,
}

impl CardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardState::Hidden => "hidden",
            CardState::Flipping => "flipping",
            CardState::Revealed => "revealed",
            CardState::Matched => "matched",
        }
    }
}

/// Lifecycle of one round on a grid session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// No grid has been built yet.
    #[default]
    Uninitialized,
    /// All cards are shown briefly; selections are ignored.
    Preview,
    Playing,
    Won,
    /// The move budget ran out before the board was cleared.
    Lost,
}

impl RoundStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, RoundStatus::Won | RoundStatus::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Uninitialized => "uninitialized",
            RoundStatus::Preview => "preview",
            RoundStatus::Playing => "playing",
            RoundStatus::Won => "won",
            RoundStatus::Lost => "lost",
        }
    }
}

/// Difficulty presets offered by the menu.
///
/// Each preset fixes the grid, the move budget, and how long the opening
/// preview shows every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Look up a preset by menu index.
    ///
    /// Out-of-range indices clamp to the nearest preset instead of failing.
    ///
    /// ```
    /// use memory_match_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_index(0), Difficulty::Easy);
    /// assert_eq!(Difficulty::from_index(-3), Difficulty::Easy);
    /// assert_eq!(Difficulty::from_index(99), Difficulty::Expert);
    /// ```
    pub fn from_index(index: i64) -> Self {
        let last = (Self::ALL.len() - 1) as i64;
        Self::ALL[index.clamp(0, last) as usize]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
            Difficulty::Expert => 3,
        }
    }

    /// Grid dimensions as `(rows, columns)`.
    pub fn grid(&self) -> (u16, u16) {
        match self {
            Difficulty::Easy => (3, 4),
            Difficulty::Normal => (DEFAULT_ROWS, DEFAULT_COLUMNS),
            Difficulty::Hard => (4, 6),
            Difficulty::Expert => (6, 6),
        }
    }

    /// Move budget (one move = one pair of picks).
    pub fn moves(&self) -> u32 {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Normal => 16,
            Difficulty::Hard => 22,
            Difficulty::Expert => 30,
        }
    }

    pub fn preview_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 3000,
            Difficulty::Normal => 2000,
            Difficulty::Hard => 1200,
            Difficulty::Expert => 800,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    /// Parse a preset name (case-insensitive) or menu index.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<i64>() {
            return Some(Self::from_index(index));
        }
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

/// Player intents produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Flip the card under the cursor.
    Flip,
    Restart,
}

impl GameAction {
    /// Parse an action name (camelCase, case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cursorup" | "up" => Some(GameAction::CursorUp),
            "cursordown" | "down" => Some(GameAction::CursorDown),
            "cursorleft" | "left" => Some(GameAction::CursorLeft),
            "cursorright" | "right" => Some(GameAction::CursorRight),
            "flip" | "select" => Some(GameAction::Flip),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Flip => "flip",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_and_scoring_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(FLIP_MS, 300);
        assert_eq!(MATCH_SETTLE_MS, 500);
        assert_eq!(MISMATCH_FLIP_BACK_MS, 1000);
        assert_eq!(POINTS_PER_MATCH, 10);
        assert_eq!(COMBO_MULTIPLIER, 5);
    }

    #[test]
    fn test_difficulty_presets_have_even_grids() {
        for difficulty in Difficulty::ALL {
            let (rows, columns) = difficulty.grid();
            assert_eq!((rows as u32 * columns as u32) % 2, 0, "{:?}", difficulty);
            let pairs = rows as u32 * columns as u32 / 2;
            assert!(difficulty.moves() >= pairs, "{:?} cannot be won", difficulty);
        }
    }

    #[test]
    fn test_difficulty_index_clamps() {
        assert_eq!(Difficulty::from_index(-1), Difficulty::Easy);
        assert_eq!(Difficulty::from_index(2), Difficulty::Hard);
        assert_eq!(Difficulty::from_index(4), Difficulty::Expert);
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_index(difficulty.index() as i64), difficulty);
        }
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("12"), Some(Difficulty::Expert));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(difficulty.name()), Some(difficulty));
        }
    }

    #[test]
    fn test_game_action_round_trips_names() {
        let actions = [
            GameAction::CursorUp,
            GameAction::CursorDown,
            GameAction::CursorLeft,
            GameAction::CursorRight,
            GameAction::Flip,
            GameAction::Restart,
        ];
        for action in actions {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("hardDrop"), None);
    }

    #[test]
    fn test_round_status_finished() {
        assert!(RoundStatus::Won.is_finished());
        assert!(RoundStatus::Lost.is_finished());
        assert!(!RoundStatus::Playing.is_finished());
        assert!(!RoundStatus::Preview.is_finished());
        assert_eq!(RoundStatus::default(), RoundStatus::Uninitialized);
    }
}
