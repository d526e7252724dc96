//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::powerup::PowerUpField;
use crate::consts::*;
use crate::settings::{Difficulty, Settings};
use crate::with_magnitude;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    MainMenu,
    DifficultyMenu,
    Rules,
    CharacterSelection,
    /// Active gameplay
    Playing,
    Paused,
    /// Goal overlay, waiting for the next kick-off
    Goal,
    GameOver,
}

impl GamePhase {
    /// Menu screens draw without the pitch
    pub fn is_menu(&self) -> bool {
        matches!(
            self,
            GamePhase::MainMenu
                | GamePhase::DifficultyMenu
                | GamePhase::Rules
                | GamePhase::CharacterSelection
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Player vs AI
    Pve,
    /// Two local players
    Pvp,
}

/// Pitch side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal sign of travel toward this side
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// A selectable player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Character {
    pub name: &'static str,
    pub team: &'static str,
}

pub const CHARACTERS: [Character; 6] = [
    Character { name: "Neymar", team: "BRASIL" },
    Character { name: "Messi", team: "ARGENTINA" },
    Character { name: "Ronaldo", team: "PORTUGAL" },
    Character { name: "Mbappé", team: "FRANÇA" },
    Character { name: "Morata", team: "ESPANHA" },
    Character { name: "Muller", team: "ALEMANHA" },
];

/// Roster entry for an index, wrapping out-of-range values
pub fn character(index: usize) -> &'static Character {
    &CHARACTERS[index % CHARACTERS.len()]
}

/// Character selection cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterSelect {
    pub p1: usize,
    pub p2: usize,
    /// Which player is choosing in Pve (1 or 2; 3 once both confirmed)
    pub selecting_for: u8,
}

impl Default for CharacterSelect {
    fn default() -> Self {
        Self {
            p1: 0,
            p2: 1,
            selecting_for: 1,
        }
    }
}

impl CharacterSelect {
    fn slot_mut(&mut self, player: u8) -> Option<&mut usize> {
        match player {
            1 => Some(&mut self.p1),
            2 => Some(&mut self.p2),
            _ => None,
        }
    }

    pub fn next(&mut self, player: u8) {
        if let Some(index) = self.slot_mut(player) {
            *index = (*index + 1) % CHARACTERS.len();
        }
    }

    pub fn previous(&mut self, player: u8) {
        if let Some(index) = self.slot_mut(player) {
            *index = (*index + CHARACTERS.len() - 1) % CHARACTERS.len();
        }
    }
}

/// How a paddle decides where to go
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    /// Tracks the ball at `speed * difficulty`
    Ai { difficulty: f32 },
}

/// A player paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub side: Side,
    pub controller: Controller,
    pub moving_up: bool,
    pub moving_down: bool,
    /// Remaining squash animation (seconds)
    pub squash_timer: f32,
    /// Current tilt in degrees (positive = leaning up)
    pub tilt_angle: f32,
    /// Arena size the paddle is clamped to
    arena: Vec2,
    offset_x: f32,
}

impl Paddle {
    pub fn new(side: Side, controller: Controller, settings: &Settings) -> Self {
        let mut paddle = Self {
            pos: Vec2::ZERO,
            size: settings.paddle_size(),
            speed: settings.player_speed,
            side,
            controller,
            moving_up: false,
            moving_down: false,
            squash_timer: 0.0,
            tilt_angle: 0.0,
            arena: settings.arena(),
            offset_x: settings.paddle_offset_x,
        };
        paddle.reset_position();
        paddle
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.controller, Controller::Ai { .. })
    }

    /// Back to the kick-off spot: offset from the goal line, vertically centred
    pub fn reset_position(&mut self) {
        self.pos.x = match self.side {
            Side::Left => self.offset_x,
            Side::Right => self.arena.x - self.size.x - self.offset_x,
        };
        self.pos.y = self.arena.y / 2.0 - self.size.y / 2.0;
    }

    /// Human movement from held keys; opposite keys cancel out
    pub fn move_by_input(&mut self, up: bool, down: bool, dt: f32) {
        self.moving_up = up;
        self.moving_down = down;
        if up {
            self.pos.y -= self.speed * dt;
        }
        if down {
            self.pos.y += self.speed * dt;
        }
        self.keep_in_bounds();
    }

    /// AI movement toward the ball's vertical centre
    pub fn track(&mut self, ball: &Ball, dt: f32) {
        let difficulty = match self.controller {
            Controller::Ai { difficulty } => difficulty,
            Controller::Human => return,
        };

        self.moving_up = false;
        self.moving_down = false;

        let diff = ball.center().y - self.center().y;
        if diff.abs() > AI_DEAD_ZONE {
            let step = self.speed * difficulty * dt;
            if diff > 0.0 {
                self.pos.y += step;
                self.moving_down = true;
            } else {
                self.pos.y -= step;
                self.moving_up = true;
            }
        }
        self.keep_in_bounds();
    }

    fn keep_in_bounds(&mut self) {
        let max_y = (self.arena.y - self.size.y).max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }

    pub fn trigger_squash(&mut self) {
        self.squash_timer = SQUASH_DURATION;
    }

    /// Squash progress in [0, 1] (0 when idle)
    pub fn squash_progress(&self) -> f32 {
        if self.squash_timer > 0.0 {
            1.0 - self.squash_timer / SQUASH_DURATION
        } else {
            0.0
        }
    }

    /// Decay squash and ease tilt toward the movement direction
    pub fn update_effects(&mut self, dt: f32) {
        if self.squash_timer > 0.0 {
            self.squash_timer = (self.squash_timer - dt).max(0.0);
        }

        let target = if self.moving_up {
            MAX_TILT
        } else if self.moving_down {
            -MAX_TILT
        } else {
            0.0
        };
        self.tilt_angle += (target - self.tilt_angle) * TILT_SPEED * dt;
    }
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Seconds left before the point fades out
    pub life: f32,
}

/// Which side a goal counts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalFor {
    Left,
    Right,
}

impl GoalFor {
    pub fn side(self) -> Side {
        match self {
            GoalFor::Left => Side::Left,
            GoalFor::Right => Side::Right,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Base speed magnitude for serves and slow-ball
    pub initial_speed: f32,
    /// Trail history for rendering (oldest first)
    pub trail: Vec<TrailPoint>,
    arena: Vec2,
}

impl Ball {
    pub fn new(settings: &Settings) -> Self {
        let speed = settings.ball_speed;
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ONE.normalize() * speed,
            size: settings.ball_extent(),
            initial_speed: speed,
            trail: Vec::new(),
            arena: settings.arena(),
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Kick-off: centre the ball and serve it diagonally toward `toward`
    /// at the initial speed, up or down at random
    pub fn reset(&mut self, toward: Side, rng: &mut impl Rng) {
        self.pos = self.arena / 2.0 - self.size / 2.0;
        let vertical = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = with_magnitude(Vec2::new(toward.direction(), vertical), self.initial_speed);
        self.trail.clear();
    }

    /// Integrate one step, bounce off the top and bottom, and report a goal
    /// once the ball has fully left the pitch on either side.
    pub fn advance(&mut self, dt: f32) -> Option<GoalFor> {
        self.pos += self.vel * dt;

        if self.pos.y <= 0.0 || self.pos.y + self.size.y >= self.arena.y {
            self.vel.y = -self.vel.y;
            self.pos.y = if self.pos.y <= 0.0 {
                0.0
            } else {
                self.arena.y - self.size.y
            };
        }

        if self.pos.x + self.size.x < 0.0 {
            return Some(GoalFor::Right);
        }
        if self.pos.x > self.arena.x {
            return Some(GoalFor::Left);
        }
        None
    }

    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: self.pos,
            life: TRAIL_LIFESPAN,
        });
    }

    /// Age trail points and drop the expired ones
    pub fn fade_trail(&mut self, dt: f32) {
        self.trail.retain(|p| p.life > 0.0);
        for point in &mut self.trail {
            point.life -= dt;
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Multiplies ball speed
    SpeedBoost,
    /// Returns the ball to its base speed
    SlowBall,
}

/// A power-up pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl PowerUp {
    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Goals per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add a goal and return the side's new total
    pub fn increment(&mut self, side: Side) -> u32 {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *slot += 1;
        *slot
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A round started (ball placed at centre)
    KickOff,
    PaddleHit { side: Side },
    Goal { scorer: Side },
    MatchOver { winner: Side },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired,
    PhaseChanged { from: GamePhase, to: GamePhase },
    QuitRequested,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    pub mode: Option<GameMode>,
    pub difficulty: Option<Difficulty>,
    pub selection: CharacterSelect,
    pub score: Score,
    /// Left (player 1) and right (player 2 or AI) paddles
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub powerups: PowerUpField,
    /// Side the next kick-off is served toward
    pub serve_toward: Side,
    /// Seconds of play in the current match
    pub match_time: f32,
    /// Remaining goal overlay time
    pub goal_pause_timer: f32,
    pub screen_shake_timer: f32,
    /// Remaining ball trail effect time
    pub trail_effect_timer: f32,
    pub trail_spawn_timer: f32,
    pub winner: Option<Side>,
    pub quit_requested: bool,
    /// Simulation frame counter
    pub time_ticks: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a session on the main menu with the given RNG seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(settings: Settings, rng: Pcg32) -> Self {
        let paddles = [
            Paddle::new(Side::Left, Controller::Human, &settings),
            Paddle::new(Side::Right, Controller::Human, &settings),
        ];
        let ball = Ball::new(&settings);
        Self {
            powerups: PowerUpField::new(&settings),
            settings,
            phase: GamePhase::MainMenu,
            mode: None,
            difficulty: None,
            selection: CharacterSelect::default(),
            score: Score::default(),
            paddles,
            ball,
            serve_toward: Side::Right,
            match_time: 0.0,
            goal_pause_timer: 0.0,
            screen_shake_timer: 0.0,
            trail_effect_timer: 0.0,
            trail_spawn_timer: 0.0,
            winner: None,
            quit_requested: false,
            time_ticks: 0,
            rng,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.paddles[0],
            Side::Right => &self.paddles[1],
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.paddles[0],
            Side::Right => &mut self.paddles[1],
        }
    }

    /// Change phase, recording the transition
    pub fn set_phase(&mut self, phase: GamePhase, events: &mut Vec<GameEvent>) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to: phase,
            });
            self.phase = phase;
        }
    }
}
