//! Startup settings
//!
//! Read once from an optional JSON file; missing fields fall back to defaults.
//! The game never writes this file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEVEL, MIN_LEVEL, STAR_COUNT, TICK_RATE};
use crate::i18n::Language;
use crate::sim::Shape;

/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "CYBER_RUNNER_SETTINGS";
/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "cyber-runner.json";
/// Upper bound for `star_count`
pub const MAX_STAR_COUNT: usize = 1000;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frame/tick rate
    pub fps: u32,
    /// Fixed RNG seed (random per launch when absent)
    pub seed: Option<u64>,

    // === Menu defaults ===
    pub language: Language,
    pub shape: Shape,
    /// Difficulty level, clamped to 1..=10
    pub level: u8,

    // === Visual Effects ===
    /// Running trail particles
    pub trail_particles: bool,
    /// Background star count, at most `MAX_STAR_COUNT`
    pub star_count: usize,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: TICK_RATE,
            seed: None,
            language: Language::En,
            shape: Shape::Rect,
            level: MIN_LEVEL,
            trail_particles: true,
            star_count: STAR_COUNT,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON and clamp out-of-range values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.level = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.fps = self.fps.clamp(1, 240);
        self.star_count = self.star_count.min(MAX_STAR_COUNT);
        self
    }

    /// Settings file location: `$CYBER_RUNNER_SETTINGS` or `./cyber-runner.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "level": 4, "shape": "triangle" }"#).unwrap();
        assert_eq!(settings.level, 4);
        assert_eq!(settings.shape, Shape::Triangle);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.language, Language::En);
        assert!(settings.trail_particles);
    }

    #[test]
    fn test_level_clamped() {
        let settings = Settings::from_json(r#"{ "level": 42 }"#).unwrap();
        assert_eq!(settings.level, MAX_LEVEL);
        let settings = Settings::from_json(r#"{ "level": 0 }"#).unwrap();
        assert_eq!(settings.level, MIN_LEVEL);
    }

    #[test]
    fn test_star_count_capped() {
        let settings = Settings::from_json(r#"{ "star_count": 4000000000 }"#).unwrap();
        assert_eq!(settings.star_count, MAX_STAR_COUNT);
        let settings = Settings::from_json(r#"{ "star_count": 0 }"#).unwrap();
        assert_eq!(settings.star_count, 0);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "fps": 30,
            "seed": 2077,
            "language": "az",
            "shape": "circle",
            "level": 10,
            "trail_particles": false,
            "star_count": 12,
            "show_fps": true
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.seed, Some(2077));
        assert_eq!(settings.language, Language::Az);
        assert_eq!(settings.star_count, 12);
        assert!(!settings.trail_particles);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ level: ").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/definitely/not/here/cyber-runner.json"));
        assert_eq!(settings, Settings::default());
    }
}
