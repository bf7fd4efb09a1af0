//! Day/night clock and parallax decoration
//!
//! Purely visual: nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::GameState;
use crate::consts::*;

/// A background star drifting left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Own drift per tick, added to the game-speed parallax
    pub speed: f32,
}

/// Scatter `count` stars over the whole screen
pub fn generate_stars<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random_range(0..=SCREEN_WIDTH as i32) as f32,
                rng.random_range(0..=SCREEN_HEIGHT as i32) as f32,
            ),
            size: rng.random_range(1..=3u32) as f32,
            speed: rng.random_range(0.1..0.5),
        })
        .collect()
}

/// Sky brightness for a point in the day cycle, 0 (night) to 1 (noon)
pub fn brightness(day_time: u32) -> f32 {
    let angle = (day_time as f32 / DAY_CYCLE_TICKS as f32) * std::f32::consts::TAU;
    (angle.sin() + 1.0) / 2.0
}

impl GameState {
    /// Drift the stars and ground grid; stars leaving the left edge
    /// re-enter on the right at a new height
    pub fn update_background(&mut self) {
        let parallax = self.game_speed * 0.1;
        for star in self.stars.iter_mut() {
            star.pos.x -= star.speed + parallax;
            if star.pos.x < 0.0 {
                star.pos.x = SCREEN_WIDTH;
                star.pos.y = self.rng.random_range(0..=SCREEN_HEIGHT as i32) as f32;
            }
        }

        self.ground_scroll = (self.ground_scroll + self.obstacle_speed()).rem_euclid(GROUND_GRID_SPACING);
    }

    /// One tick of the day/night clock
    pub fn advance_day(&mut self) {
        self.day_time = (self.day_time + 1) % DAY_CYCLE_TICKS;
    }

    /// Current sky brightness
    pub fn brightness(&self) -> f32 {
        brightness(self.day_time)
    }
}
