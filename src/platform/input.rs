//! Keyboard and mouse mapping
//!
//! Terminals report key presses, not key state. When the terminal reports
//! release events a key stays held until its release. Otherwise it counts as
//! held while a press or repeat arrived within the last `HOLD_WINDOW` frames.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;

use crate::sim::TickInput;

/// Frames a key stays held after its last press/repeat event
pub const HOLD_WINDOW: u64 = 4;

/// Folds terminal events into one `TickInput` per frame
#[derive(Debug, Default)]
pub struct InputTracker {
    /// Held key -> frame it was last seen
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// One-shot actions since the last `next_input`
    pending: TickInput,
    /// Terminal sends `Release` events; keys never expire on their own
    release_events: bool,
}

impl InputTracker {
    /// Tracker for terminals that only report presses and repeats
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker whose held keys last until their `Release` event
    pub fn with_release_events() -> Self {
        Self {
            release_events: true,
            ..Self::default()
        }
    }

    /// Record one terminal event. `to_world` maps a mouse cell to world
    /// coordinates.
    pub fn handle_event(&mut self, event: &Event, to_world: impl Fn(u16, u16) -> Vec2) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                self.pending.click = Some(to_world(*column, *row));
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(key.code, self.frame);
                self.press(key.code, key.modifiers);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
            }
        }
    }

    fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let p = &mut self.pending;
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => p.quit = true,
            KeyCode::Char('q' | 'Q') => p.quit = true,
            KeyCode::Char(' ') | KeyCode::Up => p.jump = true,
            KeyCode::Enter | KeyCode::Char('r' | 'R') => p.start = true,
            KeyCode::Char('p' | 'P') => p.pause = true,
            KeyCode::Esc => p.abort = true,
            KeyCode::Char('c' | 'C') => p.cycle_shape = true,
            KeyCode::Char('d' | 'D') => p.cycle_level = true,
            KeyCode::Char('l' | 'L') => p.toggle_language = true,
            _ => {}
        }
    }

    fn is_held(&self, code: KeyCode) -> bool {
        self.key_frame.get(&code).is_some_and(|&last| {
            self.release_events || self.frame.saturating_sub(last) <= HOLD_WINDOW
        })
    }

    /// Input for the coming tick; clears one-shot actions and advances the
    /// frame counter
    pub fn next_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.move_left = self.is_held(KeyCode::Left);
        input.move_right = self.is_held(KeyCode::Right);

        if !self.release_events {
            let frame = self.frame;
            self.key_frame
                .retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
        }
        self.frame += 1;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(tracker: &mut InputTracker, code: KeyCode) {
        tracker.handle_event(&key(code, KeyEventKind::Press), |_, _| Vec2::ZERO);
    }

    #[test]
    fn test_one_shot_cleared_after_frame() {
        let mut tracker = InputTracker::new();
        press(&mut tracker, KeyCode::Char(' '));
        assert!(tracker.next_input().jump);
        assert!(!tracker.next_input().jump);
    }

    #[test]
    fn test_held_key_expires_without_repeat() {
        let mut tracker = InputTracker::new();
        press(&mut tracker, KeyCode::Left);
        for _ in 0..=HOLD_WINDOW {
            assert!(tracker.next_input().move_left);
        }
        assert!(!tracker.next_input().move_left);
    }

    #[test]
    fn test_held_key_lasts_until_release_when_reported() {
        let mut tracker = InputTracker::with_release_events();
        press(&mut tracker, KeyCode::Right);
        for _ in 0..30 {
            assert!(tracker.next_input().move_right);
        }
        tracker.handle_event(&key(KeyCode::Right, KeyEventKind::Release), |_, _| Vec2::ZERO);
        assert!(!tracker.next_input().move_right);
    }

    #[test]
    fn test_window_mode_needs_repeats_to_stay_held() {
        let mut tracker = InputTracker::new();
        press(&mut tracker, KeyCode::Right);
        let held: Vec<bool> = (0..30).map(|_| tracker.next_input().move_right).collect();
        assert_eq!(held.iter().filter(|&&h| h).count(), HOLD_WINDOW as usize + 1);

        press(&mut tracker, KeyCode::Right);
        for _ in 0..10 {
            tracker.handle_event(&key(KeyCode::Right, KeyEventKind::Repeat), |_, _| Vec2::ZERO);
            assert!(tracker.next_input().move_right);
        }
    }

    #[test]
    fn test_release_stops_movement() {
        let mut tracker = InputTracker::new();
        press(&mut tracker, KeyCode::Right);
        assert!(tracker.next_input().move_right);
        tracker.handle_event(&key(KeyCode::Right, KeyEventKind::Release), |_, _| Vec2::ZERO);
        assert!(!tracker.next_input().move_right);
    }

    #[test]
    fn test_key_map() {
        let mut tracker = InputTracker::new();
        for c in ['r', 'p', 'c', 'd', 'l'] {
            press(&mut tracker, KeyCode::Char(c));
        }
        press(&mut tracker, KeyCode::Esc);
        let input = tracker.next_input();
        assert!(input.start && input.pause && input.abort);
        assert!(input.cycle_shape && input.cycle_level && input.toggle_language);
        assert!(!input.quit && !input.jump);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut tracker = InputTracker::new();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        tracker.handle_event(&event, |_, _| Vec2::ZERO);
        let input = tracker.next_input();
        assert!(input.quit);
        assert!(!input.cycle_shape);
    }

    #[test]
    fn test_mouse_click_mapped_to_world() {
        let mut tracker = InputTracker::new();
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 50,
            row: 11,
            modifiers: KeyModifiers::NONE,
        });
        tracker.handle_event(&event, |col, row| Vec2::new(col as f32 * 10.0, row as f32 * 20.0));
        assert_eq!(tracker.next_input().click, Some(Vec2::new(500.0, 220.0)));
    }
}
