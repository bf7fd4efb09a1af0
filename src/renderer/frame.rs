//! Per-phase frame composition

use glam::Vec2;

use super::colors::*;
use super::{Align, RenderSurface, TextSize};
use crate::Rect;
use crate::consts::*;
use crate::i18n::{Localizer, TextKey};
use crate::sim::{GamePhase, GameState};
use crate::ui::{MENU_BUTTONS, MenuAction};

/// Invincibility blink period, in ticks per half cycle (~100 ms)
const FLASH_HALF_PERIOD: u64 = 6;
/// Width of the HUD timer bars at full duration
const TIMER_BAR_WIDTH: f32 = 100.0;

/// Draw and present the current state.
///
/// `fps`, when given, is shown in the bottom-left corner.
pub fn render_frame<S, L>(
    state: &GameState,
    surface: &mut S,
    strings: &L,
    fps: Option<u32>,
) -> std::io::Result<()>
where
    S: RenderSurface + ?Sized,
    L: Localizer + ?Sized,
{
    surface.draw_background(state.brightness(), &state.stars, state.ground_scroll);

    match state.phase {
        GamePhase::Menu => draw_menu(state, surface, strings),
        GamePhase::Playing => draw_world(state, surface, strings),
        GamePhase::Paused => {
            draw_world(state, surface, strings);
            draw_pause(state, surface, strings);
        }
        GamePhase::GameOver => draw_game_over(state, surface, strings),
    }

    if let Some(fps) = fps {
        surface.draw_text(
            &format!("{fps} FPS"),
            Vec2::new(10.0, SCREEN_HEIGHT - 30.0),
            WHITE,
            TextSize::Small,
            Align::Left,
        );
    }

    surface.present()
}

fn draw_world<S, L>(state: &GameState, surface: &mut S, strings: &L)
where
    S: RenderSurface + ?Sized,
    L: Localizer + ?Sized,
{
    for obstacle in &state.obstacles {
        surface.draw_obstacle(obstacle.kind, obstacle.pos, obstacle.size);
    }

    let player = &state.player;
    for particle in &player.trail {
        let fade = (particle.life as f32 / TRAIL_LIFE_TICKS as f32).min(1.0);
        surface.draw_circle(particle.pos, particle.size, NEON_BLUE.scaled(fade));
    }

    let flashing = player.invincible && (state.time_ticks / FLASH_HALF_PERIOD) % 2 == 0;
    let color = if flashing { NEON_GREEN } else { NEON_BLUE };
    surface.draw_entity(player.shape, player.pos, player.size, color, flashing);

    draw_hud(state, surface, strings);
}

fn draw_hud<S, L>(state: &GameState, surface: &mut S, strings: &L)
where
    S: RenderSurface + ?Sized,
    L: Localizer + ?Sized,
{
    let lang = state.selection.language;
    let text = |key| strings.text(lang, key);
    let column = SCREEN_WIDTH - 150.0;

    surface.draw_text(
        &format!("{}{}", text(TextKey::Score), state.score as u64),
        Vec2::new(20.0, 20.0),
        NEON_BLUE,
        TextSize::Medium,
        Align::Left,
    );

    if state.multiplier > 1 {
        surface.draw_text(
            &format!("{}{}", text(TextKey::ScoreMultiplier), state.multiplier),
            Vec2::new(column, 20.0),
            NEON_PURPLE,
            TextSize::Small,
            Align::Left,
        );
        let width = state.multiplier_timer as f32 / MULTIPLIER_TICKS as f32 * TIMER_BAR_WIDTH;
        surface.draw_rect(Rect::new(column, 50.0, width, 10.0), NEON_PURPLE);
    }

    if state.player.invincible {
        surface.draw_text(
            text(TextKey::Invincible),
            Vec2::new(column, 70.0),
            NEON_GREEN,
            TextSize::Small,
            Align::Left,
        );
        let width =
            state.player.invincible_timer as f32 / INVINCIBILITY_TICKS as f32 * TIMER_BAR_WIDTH;
        surface.draw_rect(Rect::new(column, 100.0, width, 10.0), NEON_GREEN);
    }

    surface.draw_text(
        &format!("{}{}", text(TextKey::Speed), (state.game_speed * 10.0) as u32),
        Vec2::new(column, 120.0),
        NEON_PINK,
        TextSize::Small,
        Align::Left,
    );
}

fn draw_menu<S, L>(state: &GameState, surface: &mut S, strings: &L)
where
    S: RenderSurface + ?Sized,
    L: Localizer + ?Sized,
{
    let lang = state.selection.language;
    let center_x = SCREEN_WIDTH / 2.0;

    surface.draw_text(
        strings.text(lang, TextKey::Title),
        Vec2::new(center_x, 100.0),
        NEON_BLUE,
        TextSize::Large,
        Align::Center,
    );
    surface.draw_text(
        strings.text(lang, TextKey::Subtitle),
        Vec2::new(center_x, 150.0),
        NEON_PINK,
        TextSize::Small,
        Align::Center,
    );

    for button in &MENU_BUTTONS {
        let base = strings.text(lang, button.label);
        let label = match button.action {
            MenuAction::CycleLevel => format!("{}{}", base, state.selection.level),
            MenuAction::CycleShape => format!("{} ({})", base, state.selection.shape.as_str()),
            MenuAction::Play | MenuAction::ToggleLanguage => base.to_string(),
        };
        surface.draw_rect(button.rect, NEON_PINK);
        surface.draw_text(&label, button.rect.center(), BLACK, TextSize::Small, Align::Center);
    }

    surface.draw_text(
        strings.text(lang, TextKey::PressSpace),
        Vec2::new(center_x, 450.0),
        CYBER_YELLOW,
        TextSize::Medium,
        Align::Center,
    );
    surface.draw_text(
        strings.text(lang, TextKey::Controls),
        Vec2::new(center_x, 480.0),
        WHITE,
        TextSize::Small,
        Align::Center,
    );
    surface.draw_text(
        strings.text(lang, TextKey::Powerups),
        Vec2::new(center_x, 510.0),
        CYBER_YELLOW,
        TextSize::Small,
        Align::Center,
    );
    surface.draw_text(
        strings.text(lang, TextKey::PressLLanguage),
        Vec2::new(SCREEN_WIDTH - 250.0, SCREEN_HEIGHT - 30.0),
        WHITE,
        TextSize::Small,
        Align::Left,
    );
}

fn draw_pause<S, L>(state: &GameState, surface: &mut S, strings: &L)
where
    S: RenderSurface + ?Sized,
    L: Localizer + ?Sized,
{
    let lang = state.selection.language;
    let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);

    surface.draw_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT), OVERLAY);

    // Pause glyph: two vertical bars
    surface.draw_rect(Rect::new(center.x - 20.0, center.y - 100.0, 10.0, 200.0), WHITE);
    surface.draw_rect(Rect::new(center.x + 10.0, center.y - 100.0, 10.0, 200.0), WHITE);

    surface.draw_text(
        strings.text(lang, TextKey::GamePaused),
        center - Vec2::new(0.0, 50.0),
        NEON_BLUE,
        TextSize::Large,
        Align::Center,
    );
    surface.draw_text(
        strings.text(lang, TextKey::PressPContinue),
        center + Vec2::new(0.0, 50.0),
        WHITE,
        TextSize::Medium,
        Align::Center,
    );
}

fn draw_game_over<S, L>(state: &GameState, surface: &mut S, strings: &L)
where
    S: RenderSurface + ?Sized,
    L: Localizer + ?Sized,
{
    let lang = state.selection.language;
    let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);

    surface.draw_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT), OVERLAY);

    surface.draw_text(
        strings.text(lang, TextKey::GameOver),
        center - Vec2::new(0.0, 100.0),
        RED,
        TextSize::Large,
        Align::Center,
    );
    surface.draw_text(
        &format!("{}{}", strings.text(lang, TextKey::FinalScore), state.score as u64),
        center,
        NEON_BLUE,
        TextSize::Medium,
        Align::Center,
    );
    surface.draw_text(
        strings.text(lang, TextKey::PressRRestart),
        center + Vec2::new(0.0, 100.0),
        NEON_GREEN,
        TextSize::Medium,
        Align::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, StringTable};
    use crate::renderer::Color;
    use crate::sim::{Obstacle, ObstacleKind, Shape, Star};

    /// Records draw calls instead of drawing
    #[derive(Default)]
    struct Recorder {
        texts: Vec<String>,
        entities: Vec<(Shape, Color, bool)>,
        obstacles: Vec<ObstacleKind>,
        rects: Vec<(Rect, Color)>,
        backgrounds: usize,
        presented: usize,
    }

    impl RenderSurface for Recorder {
        fn draw_background(&mut self, _brightness: f32, _stars: &[Star], _ground_scroll: f32) {
            self.backgrounds += 1;
        }
        fn draw_entity(&mut self, shape: Shape, _pos: Vec2, _size: Vec2, color: Color, flashing: bool) {
            self.entities.push((shape, color, flashing));
        }
        fn draw_obstacle(&mut self, kind: ObstacleKind, _pos: Vec2, _size: Vec2) {
            self.obstacles.push(kind);
        }
        fn draw_text(&mut self, text: &str, _pos: Vec2, _color: Color, _size: TextSize, _align: Align) {
            self.texts.push(text.to_string());
        }
        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }
        fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}
        fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
        fn present(&mut self) -> std::io::Result<()> {
            self.presented += 1;
            Ok(())
        }
    }

    fn render(state: &GameState) -> Recorder {
        let mut recorder = Recorder::default();
        render_frame(state, &mut recorder, &StringTable, None).unwrap();
        recorder
    }

    #[test]
    fn test_menu_shows_buttons_with_selection() {
        let mut state = GameState::new(1);
        state.selection.level = 7;
        state.selection.shape = Shape::Ellipse;
        let frame = render(&state);

        assert_eq!(frame.backgrounds, 1);
        assert_eq!(frame.presented, 1);
        assert!(frame.texts.contains(&"CYBERRUNNER 2077".to_string()));
        assert!(frame.texts.contains(&"Level: 7".to_string()));
        assert!(frame.texts.contains(&"Change Character (ellipse)".to_string()));
        assert!(frame.texts.contains(&"PRESS SPACE TO START".to_string()));
        assert!(frame.entities.is_empty());
    }

    #[test]
    fn test_menu_in_azerbaijani() {
        let mut state = GameState::new(1);
        state.selection.language = Language::Az;
        let frame = render(&state);
        assert!(frame.texts.contains(&"Oyna".to_string()));
        assert!(!frame.texts.contains(&"Play".to_string()));
    }

    #[test]
    fn test_playing_draws_world_and_hud() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.score = 123.7;
        state.obstacles.push(Obstacle::new(Vec2::new(600.0, 490.0), ObstacleKind::Multiplier));
        state.multiplier = 2;
        state.multiplier_timer = 150;
        let frame = render(&state);

        assert_eq!(frame.obstacles, vec![ObstacleKind::Multiplier]);
        assert_eq!(frame.entities.len(), 1);
        assert!(frame.texts.contains(&"SCORE: 123".to_string()));
        assert!(frame.texts.contains(&"SCORE x2".to_string()));
        let bar = frame.rects.iter().find(|(_, c)| *c == NEON_PURPLE).unwrap();
        assert_eq!(bar.0.size.x, 50.0);
    }

    #[test]
    fn test_invincible_player_flashes() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.player.activate_invincibility();
        state.time_ticks = 0;
        let frame = render(&state);
        assert_eq!(frame.entities[0].1, NEON_GREEN);
        assert!(frame.entities[0].2);
        assert!(frame.texts.contains(&"INVINCIBLE".to_string()));

        state.time_ticks = FLASH_HALF_PERIOD;
        let frame = render(&state);
        assert_eq!(frame.entities[0].1, NEON_BLUE);
        assert!(!frame.entities[0].2);
    }

    #[test]
    fn test_pause_overlays_world() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Paused;
        let frame = render(&state);
        assert_eq!(frame.entities.len(), 1);
        assert!(frame.texts.contains(&"GAME PAUSED".to_string()));
        assert!(frame.rects.iter().any(|(_, c)| *c == OVERLAY));
    }

    #[test]
    fn test_game_over_shows_final_score() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        state.score = 4321.9;
        let frame = render(&state);
        assert!(frame.texts.contains(&"GAME OVER".to_string()));
        assert!(frame.texts.contains(&"FINAL SCORE: 4321".to_string()));
        assert!(frame.entities.is_empty());
    }
}
