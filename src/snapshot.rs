//! Per-frame view of the game for the renderer
//!
//! The shape never changes between phases; fields that do not apply are
//! `None` or empty. Built fresh every frame from `GameState`.

use std::f32::consts::PI;

use glam::Vec2;
use serde::Serialize;

use crate::consts::{SCREEN_SHAKE_INTENSITY, SQUASH_INTENSITY};
use crate::format_match_time;
use crate::settings::Difficulty;
use crate::sim::{
    Character, CharacterSelect, GameMode, GamePhase, GameState, Paddle, PowerUpKind, Side,
    TrailPoint, character,
};

#[derive(Debug, Clone, Serialize)]
pub struct PaddleView {
    pub pos: Vec2,
    pub size: Vec2,
    pub side: Side,
    pub character: Character,
    pub is_ai: bool,
    /// 0 when idle, rising to 1 over the squash animation
    pub squash: f32,
    /// Degrees, positive = leaning up
    pub tilt: f32,
}

impl PaddleView {
    fn new(paddle: &Paddle, character: Character) -> Self {
        Self {
            pos: paddle.pos,
            size: paddle.size,
            side: paddle.side,
            character,
            is_ai: paddle.is_ai(),
            squash: paddle.squash_progress(),
            tilt: paddle.tilt_angle,
        }
    }

    /// Draw scale for the squash animation: eases in from (1, 1), peaks
    /// halfway through and springs back
    pub fn squash_scale(&self) -> Vec2 {
        if self.squash <= 0.0 {
            return Vec2::ONE;
        }
        let amount = (self.squash * PI).sin() * SQUASH_INTENSITY;
        Vec2::new(1.0 + amount, 1.0 - amount)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub trail: Vec<TrailPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub mode: Option<GameMode>,
    pub difficulty: Option<Difficulty>,
    pub score_left: u32,
    pub score_right: u32,
    pub match_time: f32,
    /// `MM:SS`
    pub clock: String,
    pub paddles: [PaddleView; 2],
    pub ball: BallView,
    pub powerup: Option<PowerUpView>,
    pub selection: CharacterSelect,
    /// Remaining screen shake (seconds)
    pub screen_shake: f32,
    pub winner: Option<Side>,
    pub arena: Vec2,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let left = *character(state.selection.p1);
        let right = *character(state.selection.p2);
        Self {
            frame: state.time_ticks,
            phase: state.phase,
            mode: state.mode,
            difficulty: state.difficulty,
            score_left: state.score.left,
            score_right: state.score.right,
            match_time: state.match_time,
            clock: format_match_time(state.match_time),
            paddles: [
                PaddleView::new(&state.paddles[0], left),
                PaddleView::new(&state.paddles[1], right),
            ],
            ball: BallView {
                pos: state.ball.pos,
                size: state.ball.size,
                vel: state.ball.vel,
                trail: state.ball.trail.clone(),
            },
            powerup: state.powerups.active().map(|p| PowerUpView {
                kind: p.kind,
                pos: p.pos,
                size: p.size,
            }),
            selection: state.selection,
            screen_shake: state.screen_shake_timer,
            winner: state.winner,
            arena: state.settings.arena(),
        }
    }

    /// Whether the pitch (paddles, ball, pickup) is drawn this frame
    pub fn shows_pitch(&self) -> bool {
        !self.phase.is_menu()
    }

    /// Camera offset for screen shake. `jitter` is a pair of values in
    /// [-1, 1] from the renderer's own noise.
    pub fn shake_offset(&self, jitter: Vec2) -> Vec2 {
        if self.screen_shake <= 0.0 {
            return Vec2::ZERO;
        }
        jitter.clamp(Vec2::NEG_ONE, Vec2::ONE) * SCREEN_SHAKE_INTENSITY
    }
}
