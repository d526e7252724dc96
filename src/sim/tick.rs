//! Per-frame simulation step
//!
//! Input is handled first (it may change phase or move human paddles), then
//! the world advances if the phase allows it.

use super::collision::paddle_bounce;
use super::flow::{handle_input, reset_round, score_goal};
use super::state::{GameEvent, GameMode, GamePhase, GameState, PowerUpKind, Side};
use crate::consts::TRAIL_SPAWN_INTERVAL;
use crate::input::TickInput;

/// Advance the game by one frame of `dt` seconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = dt.max(0.0);

    handle_input(state, input, dt, &mut events);
    if state.quit_requested {
        return events;
    }

    state.time_ticks += 1;
    if state.screen_shake_timer > 0.0 {
        state.screen_shake_timer = (state.screen_shake_timer - dt).max(0.0);
    }

    match state.phase {
        GamePhase::Playing => update_playing(state, dt, &mut events),
        GamePhase::Goal => {
            state.goal_pause_timer -= dt;
            if state.goal_pause_timer <= 0.0 {
                state.goal_pause_timer = 0.0;
                state.set_phase(GamePhase::Playing, &mut events);
                reset_round(state, &mut events);
            }
        }
        _ => {}
    }

    events
}

fn update_playing(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    state.match_time += dt;

    if state.mode == Some(GameMode::Pve) {
        let ball = &state.ball;
        state.paddles[1].track(ball, dt);
    }
    for paddle in &mut state.paddles {
        paddle.update_effects(dt);
    }

    update_trail(state, dt);

    if let Some(goal) = state.ball.advance(dt) {
        score_goal(state, goal, events);
        return;
    }

    // Both paddles are always checked
    let hit_left = paddle_bounce(&mut state.ball, &state.paddles[0]);
    let hit_right = paddle_bounce(&mut state.ball, &state.paddles[1]);
    if hit_left {
        state.paddles[0].trigger_squash();
        events.push(GameEvent::PaddleHit { side: Side::Left });
    }
    if hit_right {
        state.paddles[1].trigger_squash();
        events.push(GameEvent::PaddleHit { side: Side::Right });
    }

    state
        .powerups
        .update(dt, &mut state.ball, &mut state.rng, events);

    let boosted = events
        .iter()
        .any(|e| *e == GameEvent::PowerUpCollected { kind: PowerUpKind::SpeedBoost });
    if boosted && state.settings.trails {
        state.trail_effect_timer = state.settings.trail_effect_duration;
    }
}

/// Lay down trail points while the boost trail effect runs, and age old ones
fn update_trail(state: &mut GameState, dt: f32) {
    if state.trail_effect_timer > 0.0 {
        state.trail_effect_timer -= dt;
        state.trail_spawn_timer += dt;
        if state.trail_spawn_timer > TRAIL_SPAWN_INTERVAL {
            state.ball.record_trail();
            state.trail_spawn_timer = 0.0;
        }
    }
    state.ball.fade_trail(dt);
}
