//! Difficulty ramp, spawn cadence and score accounting

use super::state::GameState;
use crate::consts::*;

/// Game speed for a session: level base plus a capped score ramp
#[inline]
pub fn game_speed(starting_speed: f32, score: f64) -> f32 {
    starting_speed + (score / SCORE_PER_SPEED).min(MAX_SPEED_RAMP as f64) as f32
}

/// Extra spawn pressure from the difficulty level
#[inline]
pub fn level_factor(level: u8) -> f32 {
    (level.max(MIN_LEVEL) - 1) as f32 * 2.0
}

/// Spawn timer value that must be exceeded before the next spawn.
///
/// Shrinks as speed and level rise, never below
/// `SPAWN_BASE_TICKS - SPAWN_REDUCTION_CAP` (10 ticks).
pub fn spawn_threshold(game_speed: f32, level: u8) -> f32 {
    SPAWN_BASE_TICKS - (game_speed * 5.0 + level_factor(level)).min(SPAWN_REDUCTION_CAP)
}

impl GameState {
    /// Advance the spawn timer; true when an obstacle is due (timer resets)
    pub fn spawn_due(&mut self) -> bool {
        self.spawn_timer += 1;
        if self.spawn_timer as f32 > spawn_threshold(self.game_speed, self.selection.level) {
            self.spawn_timer = 0;
            true
        } else {
            false
        }
    }

    /// Flat bonus for obstacles that scrolled past uncollided
    pub fn award_dodges(&mut self, dodged: u32) {
        self.score += SCORE_PER_DODGE * self.multiplier as f64 * dodged as f64;
    }

    /// Count the multiplier down, reverting to x1 at zero
    pub fn update_multiplier(&mut self) {
        if self.multiplier_timer > 0 {
            self.multiplier_timer -= 1;
            if self.multiplier_timer == 0 {
                self.multiplier = 1;
            }
        }
    }

    /// Survival score for one tick, then re-derive the speed from the new score
    pub fn accrue_tick_score(&mut self) {
        self.score += SCORE_PER_TICK * self.multiplier as f64;
        self.game_speed = game_speed(self.starting_speed, self.score);
    }
}
