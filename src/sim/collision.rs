//! Player/obstacle hit detection and power-up effects
//!
//! Unshielded hazards are checked before anything else: if one overlaps the
//! player the run ends and no pickup touched in the same tick is applied.
//! Everything else resolves in obstacle order, one effect per obstacle.

use super::state::{GameState, ObstacleKind};
use crate::consts::*;

/// What the collision pass decided for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Play continues (possibly with pickups applied)
    Survived,
    /// An unshielded hazard hit the player
    Fatal,
}

/// Resolve every obstacle currently overlapping the player
pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    let player_rect = state.player.rect();

    if !state.player.invincible
        && state
            .obstacles
            .iter()
            .any(|o| o.kind == ObstacleKind::Hazard && o.rect().intersects(&player_rect))
    {
        return CollisionOutcome::Fatal;
    }

    let mut hits = Vec::new();
    state.obstacles.retain(|o| {
        if o.rect().intersects(&player_rect) {
            hits.push(o.kind);
            false
        } else {
            true
        }
    });

    for kind in hits {
        apply_effect(state, kind);
    }

    CollisionOutcome::Survived
}

/// One-shot effect of touching an obstacle (the obstacle is already gone)
fn apply_effect(state: &mut GameState, kind: ObstacleKind) {
    match kind {
        // Only reachable while invincible: the hazard is simply smashed
        ObstacleKind::Hazard => log::debug!("Hazard absorbed by shield"),
        ObstacleKind::Heal => {
            state.player.activate_invincibility();
            log::debug!("Invincibility active for {} ticks", INVINCIBILITY_TICKS);
        }
        ObstacleKind::Multiplier => {
            // Retriggering refreshes the timer, it never stacks
            state.multiplier = BOOSTED_MULTIPLIER;
            state.multiplier_timer = MULTIPLIER_TICKS;
            log::debug!("Score x{} for {} ticks", BOOSTED_MULTIPLIER, MULTIPLIER_TICKS);
        }
        ObstacleKind::Neutral => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{JumpState, Obstacle};
    use glam::Vec2;

    fn grounded_state() -> GameState {
        let mut state = GameState::new(42);
        state.player.pos.y = state.player.ground_line();
        state.player.jump = JumpState::Grounded;
        state
    }

    fn at_player(state: &GameState, kind: ObstacleKind) -> Obstacle {
        Obstacle::new(state.player.pos + Vec2::new(10.0, 10.0), kind)
    }

    #[test]
    fn test_hazard_ends_run() {
        let mut state = grounded_state();
        let hazard = at_player(&state, ObstacleKind::Hazard);
        state.obstacles.push(hazard);

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Fatal);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_shielded_hazard_is_removed() {
        let mut state = grounded_state();
        state.player.activate_invincibility();
        let hazard = at_player(&state, ObstacleKind::Hazard);
        state.obstacles.push(hazard);

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Survived);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.multiplier, 1);
    }

    #[test]
    fn test_heal_grants_invincibility() {
        let mut state = grounded_state();
        let heal = at_player(&state, ObstacleKind::Heal);
        state.obstacles.push(heal);

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Survived);
        assert!(state.player.invincible);
        assert_eq!(state.player.invincible_timer, 300);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_multiplier_refreshes_without_stacking() {
        let mut state = grounded_state();
        state.multiplier = 2;
        state.multiplier_timer = 12;
        let pickup = at_player(&state, ObstacleKind::Multiplier);
        state.obstacles.push(pickup);

        resolve_collisions(&mut state);
        assert_eq!(state.multiplier, 2);
        assert_eq!(state.multiplier_timer, MULTIPLIER_TICKS);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_neutral_is_absorbed() {
        let mut state = grounded_state();
        let neutral = at_player(&state, ObstacleKind::Neutral);
        state.obstacles.push(neutral);

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Survived);
        assert!(state.obstacles.is_empty());
        assert!(!state.player.invincible);
        assert_eq!(state.multiplier, 1);
    }

    #[test]
    fn test_hazard_wins_over_same_tick_heal() {
        let mut state = grounded_state();
        let heal = at_player(&state, ObstacleKind::Heal);
        let hazard = at_player(&state, ObstacleKind::Hazard);
        state.obstacles.push(heal);
        state.obstacles.push(hazard);

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Fatal);
        assert!(!state.player.invincible);
    }

    #[test]
    fn test_non_overlapping_obstacles_untouched() {
        let mut state = grounded_state();
        state
            .obstacles
            .push(Obstacle::new(Vec2::new(800.0, 490.0), ObstacleKind::Hazard));
        let heal = at_player(&state, ObstacleKind::Heal);
        state.obstacles.push(heal);

        assert_eq!(resolve_collisions(&mut state), CollisionOutcome::Survived);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].kind, ObstacleKind::Hazard);
    }
}
