//! Obstacle spawning and scrolling
//!
//! Spawn decisions go through an injected `Rng` so a seeded source makes the
//! whole stream reproducible.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;

/// Relative spawn weights; hazards are twice as common as each pickup
pub const SPAWN_WEIGHTS: [(ObstacleKind, f32); 4] = [
    (ObstacleKind::Hazard, 0.4),
    (ObstacleKind::Heal, 0.2),
    (ObstacleKind::Multiplier, 0.2),
    (ObstacleKind::Neutral, 0.2),
];

/// Weighted random obstacle kind
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    let total: f32 = SPAWN_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random::<f32>() * total;
    for &(kind, weight) in &SPAWN_WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    SPAWN_WEIGHTS[SPAWN_WEIGHTS.len() - 1].0
}

/// Top edge for a freshly spawned obstacle.
///
/// Hazards sit around running height, pickups float at jump height and
/// neutral blocks always appear at the same mid height.
pub fn spawn_height<R: Rng + ?Sized>(rng: &mut R, kind: ObstacleKind) -> f32 {
    let screen_h = SCREEN_HEIGHT as i32;
    match kind {
        ObstacleKind::Hazard => rng.random_range(screen_h - 200..=screen_h - 60) as f32,
        ObstacleKind::Heal | ObstacleKind::Multiplier => {
            rng.random_range(screen_h - 180..=screen_h - 80) as f32
        }
        ObstacleKind::Neutral => SCREEN_HEIGHT - 110.0,
    }
}

/// Build a new obstacle just past the right edge of the screen
pub fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R) -> Obstacle {
    let kind = choose_kind(rng);
    let y = spawn_height(rng, kind);
    log::debug!("Spawned {:?} at y={}", kind, y);
    Obstacle::new(Vec2::new(SCREEN_WIDTH, y), kind)
}

impl Obstacle {
    /// Scroll left by one tick
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// True once the whole obstacle has left the screen on the left side
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -self.size.x
    }
}

/// Scroll every obstacle and drop the ones that left the screen.
/// Returns how many obstacles were dodged this tick.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, speed: f32) -> u32 {
    for obstacle in obstacles.iter_mut() {
        obstacle.advance(speed);
    }
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_offscreen());
    (before - obstacles.len()) as u32
}
