//! Localized UI strings
//!
//! The game only ever asks for text by `TextKey`; the `Localizer` decides
//! what string to show for the current language.

use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Az,
}

impl Language {
    /// Switch between English and Azerbaijani
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Az,
            Language::Az => Language::En,
        }
    }
}

/// Every piece of on-screen text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    Subtitle,
    PressSpace,
    Controls,
    Powerups,
    Score,
    ScoreMultiplier,
    Invincible,
    Speed,
    GamePaused,
    PressPContinue,
    GameOver,
    FinalScore,
    PressRRestart,
    Play,
    ChangeCharacter,
    ChangeLanguage,
    Level,
    PressLLanguage,
}

/// Lookup service for display strings
pub trait Localizer {
    fn text(&self, language: Language, key: TextKey) -> &str;
}

/// Built-in English/Azerbaijani table
#[derive(Debug, Clone, Copy, Default)]
pub struct StringTable;

impl Localizer for StringTable {
    fn text(&self, language: Language, key: TextKey) -> &str {
        match language {
            Language::En => english(key),
            Language::Az => azerbaijani(key),
        }
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "CYBERRUNNER 2077",
        TextKey::Subtitle => "A PREMIUM CYBERPUNK EXPERIENCE",
        TextKey::PressSpace => "PRESS SPACE TO START",
        TextKey::Controls => "ARROWS TO MOVE, SPACE TO JUMP",
        TextKey::Powerups => "GREEN = INVINCIBILITY | PURPLE = SCORE x2 | RED = DANGER",
        TextKey::Score => "SCORE: ",
        TextKey::ScoreMultiplier => "SCORE x",
        TextKey::Invincible => "INVINCIBLE",
        TextKey::Speed => "SPEED: ",
        TextKey::GamePaused => "GAME PAUSED",
        TextKey::PressPContinue => "PRESS P TO CONTINUE",
        TextKey::GameOver => "GAME OVER",
        TextKey::FinalScore => "FINAL SCORE: ",
        TextKey::PressRRestart => "PRESS R TO RESTART",
        TextKey::Play => "Play",
        TextKey::ChangeCharacter => "Change Character",
        TextKey::ChangeLanguage => "Change Language",
        TextKey::Level => "Level: ",
        TextKey::PressLLanguage => "Press L to change language",
    }
}

fn azerbaijani(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "SAYBERRUNNER 2077",
        TextKey::Subtitle => "PREMİUM SAYBERPUNK TƏCRÜBƏSİ",
        TextKey::PressSpace => "BAŞLAMAK ÜÇÜN SPACE BASIN",
        TextKey::Controls => "HƏRƏKƏT ÜÇÜN OKLAR, ATLAMA ÜÇÜN SPACE",
        TextKey::Powerups => "YAŞIL = QORUNMA | BƏNÖVŞƏ = XAL x2 | QIRMIZI = TƏHLÜKƏ",
        TextKey::Score => "XAL: ",
        TextKey::ScoreMultiplier => "XAL x",
        TextKey::Invincible => "QORUNAN",
        TextKey::Speed => "SÜRƏT: ",
        TextKey::GamePaused => "OYUN DAYANDIRILDI",
        TextKey::PressPContinue => "DAVAM ETMƏK ÜÇÜN P BASIN",
        TextKey::GameOver => "OYUN BİTDİ",
        TextKey::FinalScore => "SON XAL: ",
        TextKey::PressRRestart => "YENİDƏN BAŞLAMAK ÜÇÜN R BASIN",
        TextKey::Play => "Oyna",
        TextKey::ChangeCharacter => "Karakteri Dəyiş",
        TextKey::ChangeLanguage => "Dili Dəyiş",
        TextKey::Level => "Səviyyə: ",
        TextKey::PressLLanguage => "Dili dəyişmək üçün L basın",
    }
}
