//! Grid cursor for keyboard card selection.
//!
//! Moves wrap around the edges. The cursor skips nothing on its own; the
//! caller decides whether the card under it can be flipped.

use crate::types::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    rows: u16,
    columns: u16,
    row: u16,
    column: u16,
}

impl GridCursor {
    pub fn new(rows: u16, columns: u16) -> Self {
        Self {
            rows,
            columns,
            row: 0,
            column: 0,
        }
    }

    /// Adopt new grid dimensions, clamping the current position.
    pub fn resize(&mut self, rows: u16, columns: u16) {
        self.rows = rows;
        self.columns = columns;
        self.row = self.row.min(rows.saturating_sub(1));
        self.column = self.column.min(columns.saturating_sub(1));
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    pub fn position(&self) -> (u16, u16) {
        (self.row, self.column)
    }

    /// Row-major card index under the cursor.
    pub fn index(&self) -> Option<usize> {
        if self.rows == 0 || self.columns == 0 {
            return None;
        }
        Some(self.row as usize * self.columns as usize + self.column as usize)
    }

    /// Apply a movement action. Returns `true` if the action was a movement.
    pub fn apply(&mut self, action: GameAction) -> bool {
        if self.rows == 0 || self.columns == 0 {
            return false;
        }
        match action {
            GameAction::CursorUp => self.row = step(self.row, self.rows, -1),
            GameAction::CursorDown => self.row = step(self.row, self.rows, 1),
            GameAction::CursorLeft => self.column = step(self.column, self.columns, -1),
            GameAction::CursorRight => self.column = step(self.column, self.columns, 1),
            GameAction::Flip | GameAction::Restart => return false,
        }
        true
    }
}

/// Move `at` by `delta` on a ring of `len` slots. `len` is non-zero.
fn step(at: u16, len: u16, delta: i32) -> u16 {
    (at as i32 + delta).rem_euclid(len as i32) as u16
}
