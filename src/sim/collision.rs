//! Collision detection and response
//!
//! Everything on the pitch is an axis-aligned box. Paddle hits steer the
//! ball by where it struck the paddle but never change its speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, PowerUpKind};
use crate::consts::{PADDLE_STEER_FACTOR, SPEED_BOOST_FACTOR};
use crate::with_magnitude;

/// Axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Bounce the ball off a paddle if they overlap.
///
/// The ball is pushed clear of the paddle on the side it came from, its
/// horizontal velocity flips, and the vertical component is taken from the
/// contact offset (-1 at the top edge, +1 at the bottom). The result is
/// rescaled to the pre-hit speed. Returns whether a hit happened.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Paddle) -> bool {
    if !ball.rect().overlaps(&paddle.rect()) {
        return false;
    }

    if ball.vel.x < 0.0 {
        ball.pos.x = paddle.pos.x + paddle.size.x;
    } else {
        ball.pos.x = paddle.pos.x - ball.size.x;
    }

    let speed = ball.speed();
    ball.vel.x = -ball.vel.x;

    let offset = contact_offset(ball, paddle);
    ball.vel.y = speed * offset * PADDLE_STEER_FACTOR;
    ball.vel = with_magnitude(ball.vel, speed);
    true
}

/// Where the ball centre sits relative to the paddle centre, in half-heights
pub fn contact_offset(ball: &Ball, paddle: &Paddle) -> f32 {
    (ball.center().y - paddle.center().y) / (paddle.size.y / 2.0)
}

/// Apply a power-up's effect to the ball, keeping its direction.
/// A stationary ball is left alone.
pub fn apply_power_up(ball: &mut Ball, kind: PowerUpKind) {
    let speed = ball.speed();
    if speed == 0.0 {
        return;
    }
    let new_speed = match kind {
        PowerUpKind::SpeedBoost => speed * SPEED_BOOST_FACTOR,
        PowerUpKind::SlowBall => ball.initial_speed,
    };
    ball.vel = with_magnitude(ball.vel, new_speed);
}
