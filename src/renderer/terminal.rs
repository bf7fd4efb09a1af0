//! Terminal backend for `RenderSurface`
//!
//! World coordinates are scaled onto a grid of character cells. Frames are
//! composed into a back buffer and only cells that changed since the last
//! `present` are written to the terminal.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use glam::Vec2;

use super::colors::*;
use super::{Align, Color, RenderSurface, TextSize};
use crate::Rect;
use crate::consts::*;
use crate::sim::{ObstacleKind, Shape, Star};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: WHITE,
            bg: BLACK,
            bold: false,
        }
    }
}

/// Character-cell render target writing crossterm commands to `out`
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Frame being composed
    back: Vec<Cell>,
    /// Frame currently on screen
    front: Vec<Cell>,
    /// Repaint every cell on the next present
    dirty: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let len = cols as usize * rows as usize;
        Self {
            out,
            cols,
            rows,
            back: vec![Cell::default(); len],
            front: vec![Cell::default(); len],
            dirty: true,
        }
    }

    /// Adopt a new terminal size; the next frame repaints everything
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols == self.cols && rows == self.rows {
            return;
        }
        log::debug!("Terminal resized to {}x{}", cols, rows);
        let len = cols as usize * rows as usize;
        self.cols = cols;
        self.rows = rows;
        self.back = vec![Cell::default(); len];
        self.front = vec![Cell::default(); len];
        self.dirty = true;
    }

    /// Consume the surface and hand back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// World position at the center of a terminal cell (for mouse clicks)
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        let (sx, sy) = self.scale();
        Vec2::new((col as f32 + 0.5) / sx, (row as f32 + 0.5) / sy)
    }

    #[inline]
    fn scale(&self) -> (f32, f32) {
        (
            self.cols as f32 / SCREEN_WIDTH,
            self.rows as f32 / SCREEN_HEIGHT,
        )
    }

    /// Cell containing a world position (may be off-grid)
    fn to_cell(&self, pos: Vec2) -> (i32, i32) {
        let (sx, sy) = self.scale();
        ((pos.x * sx).floor() as i32, (pos.y * sy).floor() as i32)
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.back.get_mut(idx)
    }

    /// Cells overlapping a world rectangle, clipped to the grid
    fn covered_cells(&self, rect: Rect) -> impl Iterator<Item = (i32, i32)> + use<W> {
        let (sx, sy) = self.scale();
        let c0 = ((rect.pos.x * sx).floor() as i32).max(0);
        let c1 = ((rect.right() * sx).ceil() as i32).min(self.cols as i32);
        let r0 = ((rect.pos.y * sy).floor() as i32).max(0);
        let r1 = ((rect.bottom() * sy).ceil() as i32).min(self.rows as i32);
        (r0..r1).flat_map(move |row| (c0..c1).map(move |col| (col, row)))
    }

    /// Paint the background of every cell in `bounds` whose center passes
    /// `inside`. Tiny shapes that miss every cell center still get the cell
    /// under their middle.
    fn fill_shape(&mut self, bounds: Rect, color: Color, inside: impl Fn(Vec2) -> bool) {
        let cells: Vec<_> = self.covered_cells(bounds).collect();
        let mut painted = false;
        for (col, row) in cells {
            let center = self.to_world(col as u16, row as u16);
            if inside(center) {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = color;
                    cell.ch = ' ';
                    painted = true;
                }
            }
        }
        if !painted {
            let (col, row) = self.to_cell(bounds.center());
            if let Some(cell) = self.cell_mut(col, row) {
                cell.bg = color;
                cell.ch = ' ';
            }
        }
    }

    fn put_glyph(&mut self, pos: Vec2, ch: char, fg: Color) {
        let (col, row) = self.to_cell(pos);
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }
}

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn draw_background(&mut self, brightness: f32, stars: &[Star], ground_scroll: f32) {
        let (_, sy) = self.scale();
        let light = 0.5 + brightness * 1.5;

        for row in 0..self.rows as i32 {
            let y = (row as f32 + 0.5) / sy;
            let bg = if y >= GROUND_TOP {
                GROUND
            } else {
                DARK_BLUE.lerp(DARK_PURPLE, y / SCREEN_HEIGHT).scaled(light)
            };
            for col in 0..self.cols as i32 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell { bg, ..Cell::default() };
                }
            }
        }

        // Stars fade out as the sky brightens
        let star_color = WHITE.scaled(0.35 + 0.65 * (1.0 - brightness));
        for star in stars.iter().filter(|s| s.pos.y < GROUND_TOP) {
            let glyph = if star.size >= 3.0 { '*' } else { '.' };
            self.put_glyph(star.pos, glyph, star_color);
        }

        // Neon grid on the ground, scrolling with the obstacles
        let mut x = -ground_scroll;
        while x < SCREEN_WIDTH {
            if x >= 0.0 {
                self.draw_line(
                    Vec2::new(x, GROUND_TOP),
                    Vec2::new(x, SCREEN_HEIGHT - 1.0),
                    NEON_BLUE,
                );
            }
            x += GROUND_GRID_SPACING;
        }
    }

    fn draw_entity(&mut self, shape: Shape, pos: Vec2, size: Vec2, color: Color, flashing: bool) {
        let bounds = Rect { pos, size };
        let center = bounds.center();
        match shape {
            Shape::Rect => self.fill_shape(bounds, color, |_| true),
            Shape::Circle => {
                let radius = size.x.min(size.y) / 2.0;
                self.fill_shape(bounds, color, |p| p.distance(center) <= radius);
            }
            Shape::Ellipse => {
                let half = size / 2.0;
                self.fill_shape(bounds, color, |p| {
                    let d = (p - center) / half;
                    d.length_squared() <= 1.0
                });
            }
            Shape::Triangle => {
                // Apex at top center, base along the bottom edge
                self.fill_shape(bounds, color, |p| {
                    let v = (p.y - pos.y) / size.y;
                    (p.x - center.x).abs() <= v * size.x / 2.0
                });
            }
            Shape::Square => {
                let side = size.x.min(size.y);
                let square = Rect {
                    pos: Vec2::new(pos.x, pos.y + size.y - side),
                    size: Vec2::splat(side),
                };
                self.fill_shape(square, color, |_| true);
            }
        }

        if flashing {
            self.put_glyph(center, '✦', WHITE);
        }
    }

    fn draw_obstacle(&mut self, kind: ObstacleKind, pos: Vec2, size: Vec2) {
        let bounds = Rect { pos, size };
        let (color, glyph) = match kind {
            ObstacleKind::Hazard => (RED, Some('▼')),
            ObstacleKind::Heal => (NEON_GREEN, Some('+')),
            ObstacleKind::Multiplier => (NEON_PURPLE, Some('2')),
            ObstacleKind::Neutral => (NEUTRAL_GRAY, None),
        };
        self.fill_shape(bounds, color, |_| true);
        if let Some(glyph) = glyph {
            self.put_glyph(bounds.center(), glyph, BLACK);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: TextSize, align: Align) {
        let (col, row) = self.to_cell(pos);
        let width = text.chars().count() as i32;
        let start = match align {
            Align::Left => col,
            Align::Center => col - width / 2,
        };
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as i32, row) {
                cell.ch = ch;
                cell.fg = color;
                cell.bold = size == TextSize::Large;
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
            return;
        }
        let cells: Vec<_> = self.covered_cells(rect).collect();
        let alpha = color.a as f32 / 255.0;
        for (col, row) in cells {
            if let Some(cell) = self.cell_mut(col, row) {
                if color.a == 255 {
                    cell.bg = color;
                    cell.ch = ' ';
                } else {
                    cell.bg = cell.bg.lerp(color, alpha);
                    cell.fg = cell.fg.lerp(color, alpha);
                }
            }
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let (c0, r0) = self.to_cell(from);
        let (c1, r1) = self.to_cell(to);
        let (dc, dr) = (c1 - c0, r1 - r0);
        let glyph = if dc == 0 {
            '│'
        } else if dr == 0 {
            '─'
        } else {
            '·'
        };
        let steps = dc.abs().max(dr.abs());
        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let col = c0 + (dc as f32 * t).round() as i32;
            let row = r0 + (dr as f32 * t).round() as i32;
            if let Some(cell) = self.cell_mut(col, row) {
                cell.ch = glyph;
                cell.fg = color;
            }
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let (sx, _) = self.scale();
        if radius * sx < 1.0 {
            self.put_glyph(center, '•', color);
            return;
        }
        let bounds = Rect {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        };
        self.fill_shape(bounds, color, |p| p.distance(center) <= radius);
    }

    fn present(&mut self) -> std::io::Result<()> {
        let mut pen: Option<(Color, Color, bool)> = None;
        let mut cursor_at: Option<(u16, u16)> = None;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = row as usize * self.cols as usize + col as usize;
                let cell = self.back[idx];
                if !self.dirty && self.front[idx] == cell {
                    continue;
                }

                if cursor_at != Some((col, row)) {
                    self.out.queue(cursor::MoveTo(col, row))?;
                }
                if pen != Some((cell.fg, cell.bg, cell.bold)) {
                    self.out.queue(SetAttribute(if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    }))?;
                    self.out.queue(SetForegroundColor(term_color(cell.fg)))?;
                    self.out.queue(SetBackgroundColor(term_color(cell.bg)))?;
                    pen = Some((cell.fg, cell.bg, cell.bold));
                }
                self.out.queue(Print(cell.ch))?;
                cursor_at = Some((col + 1, row));
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        self.front.copy_from_slice(&self.back);
        self.dirty = false;
        Ok(())
    }
}
