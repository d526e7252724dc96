//! FutePong - a football-themed Pong
//!
//! Core modules:
//! - `sim`: Game simulation (physics, collisions, power-ups, state machine)
//! - `input`: Keyboard abstraction and press-edge tracking
//! - `snapshot`: Immutable per-frame view handed to the renderer
//! - `render`: Renderer boundary
//! - `audio`: Sound effect triggers over a pluggable backend
//! - `game`: Frame loop driver and clocks
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod game;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::{Clock, FixedClock, FrameLimiter, Game};
pub use settings::{Difficulty, Settings, SettingsError};
pub use snapshot::FrameSnapshot;

use glam::Vec2;

/// Fixed game rules and default tuning values
pub mod consts {
    /// Window defaults
    pub const WINDOW_WIDTH: f32 = 900.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    pub const WINDOW_TITLE: &str = "FutePong";
    pub const FPS_LIMIT: u32 = 120;
    /// Longest frame the simulation will step in one go (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Match defaults
    pub const MAX_SCORE: u32 = 5;
    pub const PLAYER_INITIAL_SPEED: f32 = 400.0;
    pub const BALL_INITIAL_SPEED: f32 = 424.0;
    /// Horizontal gap between a paddle and its goal line
    pub const PLAYER_OFFSET_X: f32 = 10.0;
    pub const PADDLE_WIDTH: f32 = 40.0;
    pub const PADDLE_HEIGHT: f32 = 110.0;
    pub const BALL_SIZE: f32 = 20.0;

    /// Seconds the game holds on the goal overlay before the next kick-off
    pub const GOAL_PAUSE: f32 = 1.5;
    /// Screen shake after a goal (seconds)
    pub const SCREEN_SHAKE_DURATION: f32 = 0.3;
    pub const SCREEN_SHAKE_INTENSITY: f32 = 8.0;

    /// Power-ups
    pub const POWERUP_SPAWN_TIME: f32 = 10.0;
    pub const POWERUP_ON_SCREEN_DURATION: f32 = 7.0;
    pub const POWERUP_SIZE: f32 = 40.0;
    /// Speed multiplier applied by a speed boost
    pub const SPEED_BOOST_FACTOR: f32 = 1.3;
    /// Ball must be faster than this multiple of its base speed before a
    /// slow-ball can spawn
    pub const SLOW_BALL_THRESHOLD: f32 = 1.2;
    /// Chance of a speed boost once both kinds are allowed
    pub const SPEED_BOOST_WEIGHT: f64 = 0.65;

    /// Vertical steering applied by the paddle contact offset
    pub const PADDLE_STEER_FACTOR: f32 = 0.7;
    /// AI ignores misalignment smaller than this (pixels)
    pub const AI_DEAD_ZONE: f32 = 5.0;

    /// Cosmetic paddle effects
    pub const SQUASH_DURATION: f32 = 0.25;
    pub const SQUASH_INTENSITY: f32 = 0.30;
    pub const MAX_TILT: f32 = 8.0;
    pub const TILT_SPEED: f32 = 15.0;

    /// Ball trail after a speed boost
    pub const TRAIL_EFFECT_DURATION: f32 = 2.0;
    pub const TRAIL_SPAWN_INTERVAL: f32 = 0.02;
    pub const TRAIL_LIFESPAN: f32 = 0.4;

    /// Difficulty multipliers for the AI paddle
    pub const DIFFICULTY_EASY: f32 = 0.6;
    pub const DIFFICULTY_MEDIUM: f32 = 0.8;
    pub const DIFFICULTY_HARD: f32 = 1.0;
}

/// Rescale `v` to `magnitude`, keeping its direction. Zero vectors stay zero.
#[inline]
pub fn with_magnitude(v: Vec2, magnitude: f32) -> Vec2 {
    let len = v.length();
    if len > 0.0 { v / len * magnitude } else { v }
}

/// Format seconds as a `MM:SS` match clock
pub fn format_match_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
