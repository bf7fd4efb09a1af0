//! Fixed timestep simulation tick
//!
//! Routes input according to the current phase, then advances the world by
//! one step while playing.

use glam::Vec2;

use super::collision::{CollisionOutcome, resolve_collisions};
use super::obstacle::{advance_obstacles, spawn_obstacle};
use super::player::Direction;
use super::state::{GamePhase, GameState};
use crate::ui::{MenuAction, button_at};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Run left (held)
    pub move_left: bool,
    /// Run right (held)
    pub move_right: bool,
    /// Jump (edge-triggered); also starts a run from the menu
    pub jump: bool,
    /// Start from the menu / restart after game over
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Back to the menu
    pub abort: bool,
    /// Menu: next player shape
    pub cycle_shape: bool,
    /// Menu: next difficulty level
    pub cycle_level: bool,
    /// Menu: switch language
    pub toggle_language: bool,
    /// Pointer click in world coordinates
    pub click: Option<Vec2>,
    /// Leave the game (handled by the frontend loop)
    pub quit: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // A tick that changes phase does nothing else
    if route_input(state, input) {
        return;
    }

    if state.phase == GamePhase::Playing {
        step(state, input);
    }
}

/// Apply phase transitions and menu configuration.
/// Returns true when the phase changed.
fn route_input(state: &mut GameState, input: &TickInput) -> bool {
    let before = state.phase;

    match state.phase {
        GamePhase::Menu => {
            let clicked = input.click.and_then(button_at);

            if input.cycle_shape || clicked == Some(MenuAction::CycleShape) {
                state.selection.cycle_shape();
            }
            if input.cycle_level || clicked == Some(MenuAction::CycleLevel) {
                state.selection.cycle_level();
            }
            if input.toggle_language || clicked == Some(MenuAction::ToggleLanguage) {
                state.selection.toggle_language();
            }

            if input.start || input.jump || clicked == Some(MenuAction::Play) {
                start_session(state);
            }
        }
        GamePhase::Playing => {
            if input.abort {
                state.phase = GamePhase::Menu;
            } else if input.pause {
                state.phase = GamePhase::Paused;
            }
        }
        GamePhase::Paused => {
            if input.abort {
                state.phase = GamePhase::Menu;
            } else if input.pause {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::GameOver => {
            if input.abort {
                state.phase = GamePhase::Menu;
            } else if input.start {
                start_session(state);
            }
        }
    }

    if state.phase != before {
        log::info!("Phase {:?} -> {:?}", before, state.phase);
        true
    } else {
        false
    }
}

/// Fresh session straight into play
fn start_session(state: &mut GameState) {
    state.reset_session();
    state.phase = GamePhase::Playing;
    log::info!(
        "Run started: shape={}, level={}, seed={}",
        state.selection.shape.as_str(),
        state.selection.level,
        state.seed
    );
}

/// One playing tick: physics, background, obstacles, spawning, collisions,
/// then timers and score
fn step(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Player
    if input.jump {
        state.player.jump();
    }
    if input.move_left {
        state.player.run(Direction::Left);
    }
    if input.move_right {
        state.player.run(Direction::Right);
    }
    state.player.update();
    if state.trails_enabled {
        let running = input.move_left || input.move_right;
        state.player.update_trail(&mut state.rng, running);
    }

    state.update_background();

    // Obstacles
    let speed = state.obstacle_speed();
    let dodged = advance_obstacles(&mut state.obstacles, speed);
    state.award_dodges(dodged);

    if state.spawn_due() {
        let obstacle = spawn_obstacle(&mut state.rng);
        state.obstacles.push(obstacle);
    }

    if resolve_collisions(state) == CollisionOutcome::Fatal {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: final score {}", state.score as u64);
        return;
    }

    state.update_multiplier();
    state.accrue_tick_score();
    state.advance_day();
}
