//! Game state and core simulation types
//!
//! Everything one play-through needs lives in `GameState`; the loop owns it
//! and passes it to `tick` and the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;
use crate::i18n::Language;
use crate::settings::Settings;

use super::background::{Star, generate_stars};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with configuration buttons
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended (unshielded hazard hit)
    GameOver,
}

/// Selectable player silhouettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rect,
    Circle,
    Ellipse,
    Triangle,
    Square,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Rect,
        Shape::Circle,
        Shape::Ellipse,
        Shape::Triangle,
        Shape::Square,
    ];

    /// Next shape in menu order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Rect => "rect",
            Shape::Circle => "circle",
            Shape::Ellipse => "ellipse",
            Shape::Triangle => "triangle",
            Shape::Square => "square",
        }
    }
}

/// Vertical movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    Airborne,
}

/// Short-lived dot left behind the player while running
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailParticle {
    pub pos: Vec2,
    pub size: f32,
    /// Remaining life in ticks
    pub life: u32,
}

/// The runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub jump: JumpState,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub shape: Shape,
    pub trail: Vec<TrailParticle>,
}

impl Player {
    pub fn new(shape: Shape) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity_y: 0.0,
            jump: JumpState::Airborne,
            invincible: false,
            invincible_timer: 0,
            shape,
            trail: Vec::new(),
        }
    }

    /// Lowest y the player's top edge may reach (feet on the ground)
    #[inline]
    pub fn ground_line(&self) -> f32 {
        GROUND_TOP - self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle behaviour categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ends the run unless the player is invincible
    Hazard,
    /// Grants temporary invincibility
    Heal,
    /// Doubles score gain for a while
    Multiplier,
    /// Harmless scenery, just absorbed on contact
    Neutral,
}

impl ObstacleKind {
    /// Fixed footprint per kind
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Hazard => Vec2::new(50.0, 50.0),
            ObstacleKind::Heal | ObstacleKind::Multiplier | ObstacleKind::Neutral => {
                Vec2::new(40.0, 40.0)
            }
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub kind: ObstacleKind,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(pos: Vec2, kind: ObstacleKind) -> Self {
        Self {
            pos,
            kind,
            size: kind.size(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Menu-selected configuration; survives session resets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub shape: Shape,
    /// Difficulty level, 1..=10
    pub level: u8,
    pub language: Language,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            shape: Shape::Rect,
            level: MIN_LEVEL,
            language: Language::En,
        }
    }
}

impl Selection {
    pub fn cycle_shape(&mut self) {
        self.shape = self.shape.next();
    }

    /// 1 → 2 → ... → 10 → 1
    pub fn cycle_level(&mut self) {
        self.level = (self.level % MAX_LEVEL) + 1;
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
    }
}

/// Complete game state for one process run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for spawning and decoration
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Menu selection (shape, level, language)
    pub selection: Selection,
    /// Player runner
    pub player: Player,
    /// Active obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Accumulated score
    pub score: f64,
    /// Score multiplier (1 or 2)
    pub multiplier: u32,
    /// Ticks until the multiplier reverts to 1
    pub multiplier_timer: u32,
    /// Base speed for the selected level
    pub starting_speed: f32,
    /// Current scroll speed bonus
    pub game_speed: f32,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Day/night clock, wraps at `DAY_CYCLE_TICKS`
    pub day_time: u32,
    /// Parallax star field
    pub stars: Vec<Star>,
    /// Ground grid scroll offset in [0, GROUND_GRID_SPACING)
    pub ground_scroll: f32,
    /// Ticks spent playing this session
    pub time_ticks: u64,
    /// Whether running leaves trail particles
    pub trails_enabled: bool,
    /// Star count used when reseeding the background
    pub star_count: usize,
}

impl GameState {
    /// Create a new game state on the menu with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            selection: Selection::default(),
            player: Player::new(Shape::Rect),
            obstacles: Vec::new(),
            score: 0.0,
            multiplier: 1,
            multiplier_timer: 0,
            starting_speed: 0.0,
            game_speed: 0.0,
            spawn_timer: 0,
            day_time: 0,
            stars: Vec::new(),
            ground_scroll: 0.0,
            time_ticks: 0,
            trails_enabled: true,
            star_count: STAR_COUNT,
        };
        state.reset_session();
        state
    }

    /// Create a game state whose menu selection and visuals come from settings
    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.selection = Selection {
            shape: settings.shape,
            level: settings.level.clamp(MIN_LEVEL, MAX_LEVEL),
            language: settings.language,
        };
        state.trails_enabled = settings.trail_particles;
        state.star_count = settings.star_count;
        state.reset_session();
        state
    }

    /// Fresh play-through: player, obstacles, score, speed, timers and
    /// background all start over. Phase and selection are left alone.
    pub fn reset_session(&mut self) {
        self.player = Player::new(self.selection.shape);
        self.obstacles.clear();
        self.score = 0.0;
        self.starting_speed = starting_speed_for_level(self.selection.level);
        self.game_speed = self.starting_speed;
        self.spawn_timer = 0;
        self.multiplier = 1;
        self.multiplier_timer = 0;
        self.stars = generate_stars(&mut self.rng, self.star_count);
        self.ground_scroll = 0.0;
        self.day_time = 0;
        self.time_ticks = 0;
    }

    /// Speed obstacles scroll left at this tick
    #[inline]
    pub fn obstacle_speed(&self) -> f32 {
        OBSTACLE_BASE_SPEED + self.game_speed
    }
}

/// Base game speed for a difficulty level
pub fn starting_speed_for_level(level: u8) -> f32 {
    (level.max(MIN_LEVEL) - 1) as f32 * 0.5
}
