use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::types::{CardState, RoundStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub pair: u32,
    pub face: u32,
    pub state: CardState,
    pub removed: bool,
}

impl From<&Card> for CardSnapshot {
    fn from(value: &Card) -> Self {
        Self {
            pair: value.pair(),
            face: value.face(),
            state: value.state(),
            removed: value.is_removed(),
        }
    }
}

impl CardSnapshot {
    /// Face is visible to the player.
    pub fn face_up(&self) -> bool {
        !self.removed && self.state != CardState::Hidden
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub round_id: u32,
    pub status: RoundStatus,
    pub rows: u16,
    pub columns: u16,
    pub score: u32,
    pub combo: u32,
    pub moves_total: u32,
    pub moves_remaining: u32,
    pub matched_pairs: u32,
    pub pair_count: u32,
    pub live_cards: u32,
    pub comparing: bool,
    pub queued_pairs: u32,
    pub preview_remaining_ms: u32,
    /// Row-major, indexed like the board.
    pub cards: Vec<CardSnapshot>,
}

impl SessionSnapshot {
    pub fn card_at(&self, row: u16, column: u16) -> Option<&CardSnapshot> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cards
            .get(row as usize * self.columns as usize + column as usize)
    }

    pub fn playable(&self) -> bool {
        self.status == RoundStatus::Playing && !self.budget_spent()
    }

    fn budget_spent(&self) -> bool {
        self.moves_total > 0 && self.moves_remaining == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_at_bounds() {
        let snap = SessionSnapshot {
            rows: 1,
            columns: 2,
            cards: vec![
                CardSnapshot::from(&Card::new(0, 3)),
                CardSnapshot::from(&Card::new(0, 3)),
            ],
            ..SessionSnapshot::default()
        };
        assert_eq!(snap.card_at(0, 1).map(|c| c.face), Some(3));
        assert!(snap.card_at(1, 0).is_none());
        assert!(snap.card_at(0, 2).is_none());
    }

    #[test]
    fn test_playable() {
        let mut snap = SessionSnapshot {
            status: RoundStatus::Playing,
            moves_total: 4,
            moves_remaining: 1,
            ..SessionSnapshot::default()
        };
        assert!(snap.playable());
        snap.moves_remaining = 0;
        assert!(!snap.playable());
        snap.status = RoundStatus::Won;
        assert!(!snap.playable());
    }

    #[test]
    fn test_json_uses_state_names() {
        let snap = SessionSnapshot {
            status: RoundStatus::Preview,
            ..SessionSnapshot::default()
        };
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"status\":\"preview\""), "{}", json);
    }
}
