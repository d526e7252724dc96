//! Game settings
//!
//! Loaded once at startup from an optional JSON file; every field falls back
//! to its default when missing.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Menu slot (1, 2, 3) to difficulty
    pub fn from_menu_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// AI tracking speed multiplier per difficulty, each in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: f32,
    pub medium: f32,
    pub hard: f32,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DIFFICULTY_EASY,
            medium: DIFFICULTY_MEDIUM,
            hard: DIFFICULTY_HARD,
        }
    }
}

impl DifficultyTable {
    pub fn multiplier(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,
    pub window_title: String,
    /// Frame cap for the real-time limiter (0 = uncapped)
    pub fps_limit: u32,

    // === Match rules ===
    pub max_score: u32,
    pub player_speed: f32,
    pub ball_speed: f32,
    pub paddle_offset_x: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_size: f32,
    /// Pause after a goal before the next kick-off (seconds)
    pub goal_pause: f32,

    // === Power-ups ===
    pub powerup_size: f32,
    pub powerup_spawn_time: f32,
    pub powerup_on_screen_duration: f32,
    /// Ball trail duration after a speed boost (seconds)
    pub trail_effect_duration: f32,

    // === AI ===
    pub difficulty: DifficultyTable,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Directory holding the sound clips
    pub sound_dir: String,

    // === Visual effects ===
    pub screen_shake: bool,
    pub trails: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            window_title: WINDOW_TITLE.to_string(),
            fps_limit: FPS_LIMIT,

            max_score: MAX_SCORE,
            player_speed: PLAYER_INITIAL_SPEED,
            ball_speed: BALL_INITIAL_SPEED,
            paddle_offset_x: PLAYER_OFFSET_X,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_size: BALL_SIZE,
            goal_pause: GOAL_PAUSE,

            powerup_size: POWERUP_SIZE,
            powerup_spawn_time: POWERUP_SPAWN_TIME,
            powerup_on_screen_duration: POWERUP_ON_SCREEN_DURATION,
            trail_effect_duration: TRAIL_EFFECT_DURATION,

            difficulty: DifficultyTable::default(),

            master_volume: 1.0,
            sfx_volume: 0.1,
            muted: false,
            sound_dir: "Assets/Sounds".to_string(),

            screen_shake: true,
            trails: true,
        }
    }
}

/// Errors raised while loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Arena size in pixels
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    pub fn ball_extent(&self) -> Vec2 {
        Vec2::splat(self.ball_size)
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("player_speed", self.player_speed),
            ("ball_speed", self.ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_size", self.ball_size),
            ("powerup_size", self.powerup_size),
            ("powerup_spawn_time", self.powerup_spawn_time),
            ("powerup_on_screen_duration", self.powerup_on_screen_duration),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.max_score == 0 {
            return Err(SettingsError::Invalid("max_score must be at least 1".into()));
        }
        if self.paddle_height > self.window_height {
            return Err(SettingsError::Invalid(
                "paddle_height exceeds window_height".into(),
            ));
        }
        // Power-ups spawn inside the central half of the arena
        if self.powerup_size >= self.window_width * 0.5
            || self.powerup_size >= self.window_height * 0.8
        {
            return Err(SettingsError::Invalid(
                "powerup_size does not fit the spawn area".into(),
            ));
        }

        let table = &self.difficulty;
        for (name, value) in [("easy", table.easy), ("medium", table.medium), ("hard", table.hard)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SettingsError::Invalid(format!(
                    "difficulty.{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
