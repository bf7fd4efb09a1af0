//! Rendering module
//!
//! The simulation never draws. `render_frame` turns a `GameState` into calls
//! on a `RenderSurface`; backends (the terminal one here) decide how those
//! calls become pixels or character cells.

pub mod frame;
pub mod terminal;

pub use frame::render_frame;
pub use terminal::TerminalSurface;

use glam::Vec2;

use crate::Rect;
use crate::sim::{ObstacleKind, Shape, Star};

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Scale RGB by `factor`, saturating at 255
    pub fn scaled(self, factor: f32) -> Self {
        let channel = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }

    /// Linear blend toward `other` (t = 0 gives self)
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Neon palette
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const NEON_BLUE: Color = Color::rgb(0, 191, 255);
    pub const NEON_PINK: Color = Color::rgb(255, 20, 147);
    pub const NEON_GREEN: Color = Color::rgb(57, 255, 20);
    pub const NEON_PURPLE: Color = Color::rgb(138, 43, 226);
    pub const CYBER_YELLOW: Color = Color::rgb(255, 223, 0);
    pub const DARK_BLUE: Color = Color::rgb(10, 10, 40);
    pub const DARK_PURPLE: Color = Color::rgb(30, 10, 50);
    pub const GROUND: Color = Color::rgb(40, 40, 40);
    pub const NEUTRAL_GRAY: Color = Color::rgb(100, 100, 100);
    /// Dimming veil behind pause/game-over text
    pub const OVERLAY: Color = Color::rgb(0, 0, 0).with_alpha(180);
}

/// Font size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Position is the top-left corner
    Left,
    /// Position is the center
    Center,
}

/// Drawing primitives the game needs from a backend.
///
/// All coordinates are world coordinates (`SCREEN_WIDTH` × `SCREEN_HEIGHT`,
/// y down).
pub trait RenderSurface {
    /// Sky gradient at `brightness` (0 night, 1 day), stars and the
    /// scrolling ground strip
    fn draw_background(&mut self, brightness: f32, stars: &[Star], ground_scroll: f32);
    /// Player silhouette; `flashing` is set on the invincibility blink frames
    fn draw_entity(&mut self, shape: Shape, pos: Vec2, size: Vec2, color: Color, flashing: bool);
    fn draw_obstacle(&mut self, kind: ObstacleKind, pos: Vec2, size: Vec2);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: TextSize, align: Align);
    /// Filled rectangle; alpha below 255 dims what is underneath
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Show the finished frame
    fn present(&mut self) -> std::io::Result<()>;
}
