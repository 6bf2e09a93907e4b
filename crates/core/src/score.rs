//! Score engine - match points and combo streaks
//!
//! A match is worth [`POINTS_PER_MATCH`] plus a combo bonus of
//! `(combo - 1) * COMBO_MULTIPLIER` once the streak is longer than one.
//! Back-to-back matches therefore score 10, 15, 20, 25, ...

use crate::events::{EventBus, GameEvent};
use crate::stats::StatsReporter;
use crate::types::{COMBO_MULTIPLIER, POINTS_PER_MATCH};

/// Breakdown of the points one match earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchPoints {
    pub base: u32,
    pub combo_bonus: u32,
    pub total: u32,
    /// Combo value after this match.
    pub combo: u32,
}

/// Bonus for a match that brings the streak to `combo`.
pub fn combo_bonus(combo: u32) -> u32 {
    if combo > 1 {
        (combo - 1) * COMBO_MULTIPLIER
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreEngine {
    score: u32,
    combo: u32,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Credit a match.
    pub fn add_match_points(&mut self, events: &EventBus) -> MatchPoints {
        self.combo += 1;
        let bonus = combo_bonus(self.combo);
        let total = POINTS_PER_MATCH + bonus;
        self.score = self.score.saturating_add(total);

        log::debug!(
            "Match! Combo: {} | Points: {} (Base: {} + Bonus: {}) | Total Score: {}",
            self.combo,
            total,
            POINTS_PER_MATCH,
            bonus,
            self.score
        );

        events.emit(GameEvent::ScoreChanged { score: self.score });
        events.emit(GameEvent::ComboChanged { combo: self.combo });

        MatchPoints {
            base: POINTS_PER_MATCH,
            combo_bonus: bonus,
            total,
            combo: self.combo,
        }
    }

    /// Break the current streak, reporting it if there was one.
    pub fn reset_combo(&mut self, events: &EventBus, stats: &mut dyn StatsReporter) {
        if self.combo == 0 {
            return;
        }
        let finished = self.combo;
        log::debug!("Combo broken! Final combo: {}", finished);
        stats.update_max_combo(finished);
        self.combo = 0;
        events.emit(GameEvent::ComboBroken { combo: finished });
        events.emit(GameEvent::ComboChanged { combo: 0 });
    }

    /// Zero score and combo for a new round.
    pub fn reset_round(&mut self, events: &EventBus) {
        self.score = 0;
        self.combo = 0;
        events.emit(GameEvent::ScoreChanged { score: 0 });
        events.emit(GameEvent::ComboChanged { combo: 0 });
    }

    /// Close the round: flush the streak, then report score and game count.
    pub fn finish_game(&mut self, events: &EventBus, stats: &mut dyn StatsReporter) {
        self.reset_combo(events, stats);
        stats.add_score(self.score);
        stats.increment_games_played();
        log::info!("Game finished! Final score: {}", self.score);
    }
}
