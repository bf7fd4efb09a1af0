//! Player physics: gravity, jumping, running and the invincibility countdown

use glam::Vec2;
use rand::Rng;

use super::state::{JumpState, Player, TrailParticle};
use crate::consts::*;

/// Horizontal run direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Player {
    /// Step the runner sideways, staying on screen
    pub fn run(&mut self, direction: Direction) {
        let max_x = SCREEN_WIDTH - self.size.x;
        match direction {
            Direction::Left => self.pos.x = (self.pos.x - PLAYER_RUN_SPEED).max(0.0),
            Direction::Right => self.pos.x = (self.pos.x + PLAYER_RUN_SPEED).min(max_x),
        }
    }

    /// Start a jump. Ignored unless standing on the ground.
    pub fn jump(&mut self) {
        if self.jump == JumpState::Grounded {
            self.velocity_y = JUMP_VELOCITY;
            self.jump = JumpState::Airborne;
        }
    }

    /// Integrate one tick of vertical motion and count down invincibility
    pub fn update(&mut self) {
        self.velocity_y += GRAVITY;
        self.pos.y += self.velocity_y;

        let ground = self.ground_line();
        if self.pos.y >= ground {
            self.pos.y = ground;
            self.velocity_y = 0.0;
            self.jump = JumpState::Grounded;
        }

        if self.invincible {
            self.invincible_timer = self.invincible_timer.saturating_sub(1);
            if self.invincible_timer == 0 {
                self.invincible = false;
            }
        }
    }

    /// Become immune to hazards for `INVINCIBILITY_TICKS`
    pub fn activate_invincibility(&mut self) {
        self.invincible = true;
        self.invincible_timer = INVINCIBILITY_TICKS;
    }

    /// Age the trail and maybe drop a new particle at the player's feet
    pub fn update_trail<R: Rng + ?Sized>(&mut self, rng: &mut R, running: bool) {
        if running && rng.random_bool(TRAIL_SPAWN_CHANCE) {
            self.trail.push(TrailParticle {
                pos: Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y),
                size: rng.random_range(2..=5u32) as f32,
                life: TRAIL_LIFE_TICKS,
            });
        }

        for particle in self.trail.iter_mut() {
            particle.life = particle.life.saturating_sub(1);
        }
        self.trail.retain(|p| p.life > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Shape;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grounded_player() -> Player {
        let mut player = Player::new(Shape::Rect);
        player.pos.y = player.ground_line();
        player.jump = JumpState::Grounded;
        player
    }

    #[test]
    fn test_falls_and_lands() {
        let mut player = Player::new(Shape::Rect);
        assert_eq!(player.jump, JumpState::Airborne);

        for _ in 0..120 {
            player.update();
            assert!(player.pos.y <= player.ground_line());
        }
        assert_eq!(player.jump, JumpState::Grounded);
        assert_eq!(player.pos.y, player.ground_line());
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut player = grounded_player();
        player.jump();
        assert_eq!(player.velocity_y, JUMP_VELOCITY);
        assert_eq!(player.jump, JumpState::Airborne);

        player.update();
        let vy = player.velocity_y;
        // No double jump
        player.jump();
        assert_eq!(player.velocity_y, vy);
    }

    #[test]
    fn test_jump_returns_to_ground() {
        let mut player = grounded_player();
        player.jump();
        let mut ticks = 0;
        loop {
            player.update();
            ticks += 1;
            if player.jump == JumpState::Grounded {
                break;
            }
            assert!(ticks < 100, "jump never landed");
        }
        assert!(ticks > 30);
    }

    #[test]
    fn test_run_clamped_to_screen() {
        let mut player = grounded_player();
        player.pos.x = 3.0;
        player.run(Direction::Left);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = SCREEN_WIDTH - player.size.x - 2.0;
        player.run(Direction::Right);
        assert_eq!(player.pos.x, SCREEN_WIDTH - player.size.x);

        player.pos.x = 100.0;
        player.run(Direction::Right);
        assert_eq!(player.pos.x, 108.0);
    }

    #[test]
    fn test_invincibility_counts_down() {
        let mut player = grounded_player();
        player.activate_invincibility();
        assert!(player.invincible);
        assert_eq!(player.invincible_timer, INVINCIBILITY_TICKS);

        for _ in 0..INVINCIBILITY_TICKS - 1 {
            player.update();
        }
        assert!(player.invincible);
        assert_eq!(player.invincible_timer, 1);

        player.update();
        assert!(!player.invincible);
        assert_eq!(player.invincible_timer, 0);
    }

    #[test]
    fn test_trail_spawns_only_while_running_and_expires() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut player = grounded_player();

        for _ in 0..50 {
            player.update_trail(&mut rng, false);
        }
        assert!(player.trail.is_empty());

        for _ in 0..50 {
            player.update_trail(&mut rng, true);
        }
        assert!(!player.trail.is_empty());
        assert!(player.trail.iter().all(|p| p.life > 0 && p.life < TRAIL_LIFE_TICKS));
        assert!(player.trail.iter().all(|p| (2.0..=5.0).contains(&p.size)));

        for _ in 0..TRAIL_LIFE_TICKS {
            player.update_trail(&mut rng, false);
        }
        assert!(player.trail.is_empty());
    }
}
