//! Power-up lifecycle
//!
//! One pickup slot. While empty a spawn timer runs; when it fires a pickup
//! appears in the middle of the pitch and an on-screen timer starts. The
//! pickup disappears when the ball collects it or the timer runs out.

use glam::Vec2;
use rand::Rng;

use super::collision::apply_power_up;
use super::state::{Ball, GameEvent, PowerUp, PowerUpKind};
use crate::consts::{SLOW_BALL_THRESHOLD, SPEED_BOOST_WEIGHT};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct PowerUpField {
    /// Last spawned pickup; only meaningful while `active`
    pub current: Option<PowerUp>,
    pub spawn_timer: f32,
    pub on_screen_timer: f32,
    spawn_time: f32,
    on_screen_duration: f32,
    size: Vec2,
    arena: Vec2,
}

impl PowerUpField {
    pub fn new(settings: &Settings) -> Self {
        Self {
            current: None,
            spawn_timer: 0.0,
            on_screen_timer: 0.0,
            spawn_time: settings.powerup_spawn_time,
            on_screen_duration: settings.powerup_on_screen_duration,
            size: Vec2::splat(settings.powerup_size),
            arena: settings.arena(),
        }
    }

    /// The pickup currently on the pitch, if any
    pub fn active(&self) -> Option<&PowerUp> {
        self.current.as_ref().filter(|p| p.active)
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// Remove any pickup from the pitch (round reset)
    pub fn deactivate(&mut self) {
        if let Some(powerup) = self.current.as_mut() {
            powerup.active = false;
        }
        self.on_screen_timer = 0.0;
    }

    /// Advance timers, spawn or expire the pickup, and apply it on contact
    pub fn update(
        &mut self,
        dt: f32,
        ball: &mut Ball,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        if self.is_active() {
            self.on_screen_timer += dt;
            if self.on_screen_timer >= self.on_screen_duration {
                log::debug!("Power-up expired");
                self.deactivate();
                events.push(GameEvent::PowerUpExpired);
            }
        } else {
            self.spawn_timer += dt;
            if self.spawn_timer >= self.spawn_time {
                self.spawn_timer = 0.0;
                self.on_screen_timer = 0.0;
                let kind = choose_kind(ball, rng);
                let pos = self.spawn_position(rng);
                log::debug!("Power-up {:?} spawned at ({}, {})", kind, pos.x, pos.y);
                self.current = Some(PowerUp {
                    kind,
                    pos,
                    size: self.size,
                    active: true,
                });
                events.push(GameEvent::PowerUpSpawned { kind });
            }
        }

        let collected = self
            .active()
            .filter(|p| p.rect().overlaps(&ball.rect()))
            .map(|p| p.kind);
        if let Some(kind) = collected {
            log::debug!("Power-up {:?} collected", kind);
            apply_power_up(ball, kind);
            self.deactivate();
            events.push(GameEvent::PowerUpCollected { kind });
        }
    }

    /// Random integer position in the central band: x in [25%, 75%] of the
    /// width and y in [10%, 90%] of the height, inset by the pickup size
    pub fn spawn_position(&self, rng: &mut impl Rng) -> Vec2 {
        let x_min = (self.arena.x * 0.25) as i32;
        let x_max = ((self.arena.x * 0.75) as i32 - self.size.x as i32).max(x_min);
        let y_min = (self.arena.y * 0.1) as i32;
        let y_max = ((self.arena.y * 0.9) as i32 - self.size.y as i32).max(y_min);
        Vec2::new(
            rng.random_range(x_min..=x_max) as f32,
            rng.random_range(y_min..=y_max) as f32,
        )
    }
}

/// Pick the kind of the next pickup. A slow-ball is only offered once the
/// ball is clearly faster than its base speed.
pub fn choose_kind(ball: &Ball, rng: &mut impl Rng) -> PowerUpKind {
    let boosted = ball.speed() > ball.initial_speed * SLOW_BALL_THRESHOLD;
    if !boosted || rng.random_bool(SPEED_BOOST_WEIGHT) {
        PowerUpKind::SpeedBoost
    } else {
        PowerUpKind::SlowBall
    }
}
