//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same settings, seed, input and
//! frame times, a session plays out identically:
//! - Seeded RNG only (serve direction, pickup kind and placement)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod flow;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Aabb, apply_power_up, paddle_bounce};
pub use flow::{handle_input, reset_match, reset_round, score_goal};
pub use powerup::{PowerUpField, choose_kind};
pub use state::{
    Ball, CHARACTERS, Character, CharacterSelect, Controller, GameEvent, GameMode, GamePhase,
    GameState, GoalFor, Paddle, PowerUp, PowerUpKind, Score, Side, TrailPoint, character,
};
pub use tick::tick;
