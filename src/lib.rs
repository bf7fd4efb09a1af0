//! Cyber Runner - a neon side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Render surface abstraction, frame orchestration, terminal backend
//! - `i18n`: Localized UI strings
//! - `ui`: Menu button layout
//! - `settings`: Data-driven startup configuration
//! - `platform`: Terminal input mapping

pub mod i18n;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use i18n::{Language, Localizer, StringTable, TextKey};
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// World dimensions (all simulation coordinates live in this space)
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Top edge of the ground strip
    pub const GROUND_TOP: f32 = SCREEN_HEIGHT - GROUND_HEIGHT;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 200.0;
    pub const PLAYER_RUN_SPEED: f32 = 8.0;
    /// Upward velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.8;

    /// Power-up durations (5 seconds at 60 Hz)
    pub const INVINCIBILITY_TICKS: u32 = 300;
    pub const MULTIPLIER_TICKS: u32 = 300;
    pub const BOOSTED_MULTIPLIER: u32 = 2;

    /// Obstacles scroll at this speed plus the current game speed
    pub const OBSTACLE_BASE_SPEED: f32 = 5.0;

    /// Spawn cadence: spawn once the timer exceeds BASE - min(CAP, ...)
    pub const SPAWN_BASE_TICKS: f32 = 60.0;
    pub const SPAWN_REDUCTION_CAP: f32 = 50.0;

    /// Scoring
    pub const SCORE_PER_TICK: f64 = 0.1;
    pub const SCORE_PER_DODGE: f64 = 10.0;
    /// Score needed for one unit of speed ramp
    pub const SCORE_PER_SPEED: f64 = 1000.0;
    pub const MAX_SPEED_RAMP: f32 = 10.0;

    /// Difficulty levels selectable from the menu
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 10;

    /// Day/night cycle length (60 seconds)
    pub const DAY_CYCLE_TICKS: u32 = 3600;
    /// Background star count
    pub const STAR_COUNT: usize = 100;
    /// Spacing of the neon grid lines painted on the ground
    pub const GROUND_GRID_SPACING: f32 = 40.0;

    /// Trail particles
    pub const TRAIL_SPAWN_CHANCE: f64 = 0.3;
    pub const TRAIL_LIFE_TICKS: u32 = 20;
}

/// Axis-aligned rectangle in world coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && other.pos.x < self.right()
            && self.pos.y < other.bottom()
            && other.pos.y < self.bottom()
    }

    /// Point containment, right/bottom edges exclusive
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x < self.right()
            && point.y >= self.pos.y
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(-5.0, 2.0, 6.0, 2.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(400.0, 200.0, 200.0, 50.0);
        assert!(r.contains(Vec2::new(400.0, 200.0)));
        assert!(r.contains(Vec2::new(500.0, 225.0)));
        assert!(!r.contains(Vec2::new(600.0, 225.0)));
        assert!(!r.contains(Vec2::new(399.0, 225.0)));
    }
}
