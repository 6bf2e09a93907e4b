//! Stats collaborator - where lifetime statistics are reported
//!
//! The engine reports and forgets: every call is fire-and-forget and nothing
//! flows back into game state. Storage is the implementor's business.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Receiver for match, combo, and score statistics.
pub trait StatsReporter {
    /// One pair was matched.
    fn record_match(&mut self);

    /// A combo streak ended at `combo`.
    fn update_max_combo(&mut self, combo: u32);

    /// Final score of a finished round.
    fn add_score(&mut self, points: u32);

    fn increment_games_played(&mut self);
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStats;

impl StatsReporter for NoopStats {
    fn record_match(&mut self) {}
    fn update_max_combo(&mut self, _combo: u32) {}
    fn add_score(&mut self, _points: u32) {}
    fn increment_games_played(&mut self) {}
}

/// In-memory player statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_score: u64,
    pub max_combo: u32,
    pub games_played: u32,
    pub total_matches: u32,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl StatsReporter for GameStats {
    fn record_match(&mut self) {
        self.total_matches = self.total_matches.saturating_add(1);
    }

    fn update_max_combo(&mut self, combo: u32) {
        if combo > self.max_combo {
            self.max_combo = combo;
            log::info!("New max combo: {}", combo);
        }
    }

    fn add_score(&mut self, points: u32) {
        self.total_score = self.total_score.saturating_add(points as u64);
    }

    fn increment_games_played(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }
}

/// Share one reporter between the session and whoever reads it afterwards.
impl<S: StatsReporter> StatsReporter for Rc<RefCell<S>> {
    fn record_match(&mut self) {
        self.borrow_mut().record_match();
    }

    fn update_max_combo(&mut self, combo: u32) {
        self.borrow_mut().update_max_combo(combo);
    }

    fn add_score(&mut self, points: u32) {
        self.borrow_mut().add_score(points);
    }

    fn increment_games_played(&mut self) {
        self.borrow_mut().increment_games_played();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_combo_only_grows() {
        let mut stats = GameStats::new();
        stats.update_max_combo(3);
        stats.update_max_combo(2);
        assert_eq!(stats.max_combo, 3);
        stats.update_max_combo(5);
        assert_eq!(stats.max_combo, 5);
    }

    #[test]
    fn test_counters() {
        let mut stats = GameStats::new();
        stats.record_match();
        stats.record_match();
        stats.add_score(35);
        stats.add_score(10);
        stats.increment_games_played();
        assert_eq!(stats.total_matches, 2);
        assert_eq!(stats.total_score, 45);
        assert_eq!(stats.games_played, 1);
    }

    #[test]
    fn test_json_export() {
        let stats = GameStats {
            total_score: 120,
            max_combo: 4,
            games_played: 2,
            total_matches: 9,
        };
        let json = stats.to_json().unwrap();
        assert!(json.contains("\"max_combo\": 4"));
        assert_eq!(GameStats::from_json(&json).unwrap(), stats);
    }

    #[test]
    fn test_shared_reporter_writes_through() {
        let shared = Rc::new(RefCell::new(GameStats::new()));
        let mut reporter: Box<dyn StatsReporter> = Box::new(Rc::clone(&shared));
        reporter.record_match();
        reporter.update_max_combo(2);
        assert_eq!(shared.borrow().total_matches, 1);
        assert_eq!(shared.borrow().max_combo, 2);
    }
}
