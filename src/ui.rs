//! Menu button layout and hit testing
//!
//! Shared by the state machine (pointer clicks) and the renderer (drawing).

use glam::Vec2;

use crate::Rect;
use crate::consts::SCREEN_WIDTH;
use crate::i18n::TextKey;

/// What a menu button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    CycleShape,
    ToggleLanguage,
    CycleLevel,
}

/// A clickable menu button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuButton {
    pub rect: Rect,
    pub label: TextKey,
    pub action: MenuAction,
}

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_X: f32 = SCREEN_WIDTH / 2.0 - BUTTON_WIDTH / 2.0;

/// Menu buttons, top to bottom
pub const MENU_BUTTONS: [MenuButton; 4] = [
    MenuButton {
        rect: Rect::new(BUTTON_X, 200.0, BUTTON_WIDTH, BUTTON_HEIGHT),
        label: TextKey::Play,
        action: MenuAction::Play,
    },
    MenuButton {
        rect: Rect::new(BUTTON_X, 260.0, BUTTON_WIDTH, BUTTON_HEIGHT),
        label: TextKey::ChangeCharacter,
        action: MenuAction::CycleShape,
    },
    MenuButton {
        rect: Rect::new(BUTTON_X, 320.0, BUTTON_WIDTH, BUTTON_HEIGHT),
        label: TextKey::ChangeLanguage,
        action: MenuAction::ToggleLanguage,
    },
    MenuButton {
        rect: Rect::new(BUTTON_X, 380.0, BUTTON_WIDTH, BUTTON_HEIGHT),
        label: TextKey::Level,
        action: MenuAction::CycleLevel,
    },
];

/// Action of the button under `point`, if any
pub fn button_at(point: Vec2) -> Option<MenuAction> {
    MENU_BUTTONS
        .iter()
        .find(|b| b.rect.contains(point))
        .map(|b| b.action)
}
