//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod scoring;
pub mod state;
pub mod tick;

pub use background::{Star, brightness, generate_stars};
pub use collision::{CollisionOutcome, resolve_collisions};
pub use obstacle::{SPAWN_WEIGHTS, advance_obstacles, choose_kind, spawn_height, spawn_obstacle};
pub use player::Direction;
pub use scoring::{game_speed, level_factor, spawn_threshold};
pub use state::{
    GamePhase, GameState, JumpState, Obstacle, ObstacleKind, Player, Selection, Shape,
    TrailParticle, starting_speed_for_level,
};
pub use tick::{TickInput, tick};
