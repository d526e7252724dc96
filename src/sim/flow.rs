//! Screen flow: menus, pause, goals and match lifecycle
//!
//! Discrete key presses drive every transition except the goal pause, which
//! runs on a timer in `tick`. Presses that mean nothing in the current phase
//! are ignored.

use super::state::{
    Ball, Controller, GameEvent, GameMode, GamePhase, GameState, GoalFor, Paddle, Side,
};
use crate::input::{Key, TickInput};
use crate::settings::Difficulty;

/// React to this frame's input. Human paddles move here.
pub fn handle_input(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    if input.just_pressed(Key::Escape) {
        if state.phase == GamePhase::MainMenu {
            log::info!("Quit requested from main menu");
            state.quit_requested = true;
            events.push(GameEvent::QuitRequested);
        } else {
            state.selection.selecting_for = 1;
            state.set_phase(GamePhase::MainMenu, events);
        }
        return;
    }

    match state.phase {
        GamePhase::MainMenu => {
            if input.just_pressed(Key::Num1) {
                choose_mode(state, GameMode::Pve, events);
            } else if input.just_pressed(Key::Num2) {
                choose_mode(state, GameMode::Pvp, events);
            } else if input.just_pressed(Key::Num3) {
                state.set_phase(GamePhase::Rules, events);
            }
        }

        GamePhase::CharacterSelection => match state.mode {
            Some(GameMode::Pve) => pve_character_selection(state, input, events),
            Some(GameMode::Pvp) => pvp_character_selection(state, input, events),
            None => {}
        },

        GamePhase::DifficultyMenu => {
            let slot = input.pressed.iter().find_map(|k| k.menu_slot());
            if let Some(difficulty) = slot.and_then(Difficulty::from_menu_slot) {
                state.difficulty = Some(difficulty);
                reset_match(state, events);
            }
        }

        GamePhase::Playing => {
            state.paddles[0].move_by_input(input.p1_up, input.p1_down, dt);
            if state.mode == Some(GameMode::Pvp) {
                state.paddles[1].move_by_input(input.p2_up, input.p2_down, dt);
            }
            if input.just_pressed(Key::P) {
                state.set_phase(GamePhase::Paused, events);
            }
        }

        GamePhase::Paused => {
            if input.just_pressed(Key::P) {
                state.set_phase(GamePhase::Playing, events);
            }
            if input.just_pressed(Key::R) {
                reset_match(state, events);
            }
        }

        GamePhase::GameOver => {
            if input.just_pressed(Key::Enter) {
                reset_match(state, events);
            }
        }

        GamePhase::Rules | GamePhase::Goal => {}
    }
}

fn choose_mode(state: &mut GameState, mode: GameMode, events: &mut Vec<GameEvent>) {
    state.mode = Some(mode);
    state.selection.selecting_for = 1;
    state.set_phase(GamePhase::CharacterSelection, events);
}

/// One player at a time: arrows pick, Enter confirms P1 then the AI opponent
fn pve_character_selection(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let player = state.selection.selecting_for;
    if input.just_pressed(Key::Right) {
        state.selection.next(player);
    }
    if input.just_pressed(Key::Left) {
        state.selection.previous(player);
    }
    if input.just_pressed(Key::Enter) {
        state.selection.selecting_for += 1;
        if state.selection.selecting_for > 2 {
            state.set_phase(GamePhase::DifficultyMenu, events);
        }
    }
}

/// Both players at once: A/D for P1, arrows for P2, Enter kicks off
fn pvp_character_selection(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.just_pressed(Key::D) {
        state.selection.next(1);
    }
    if input.just_pressed(Key::A) {
        state.selection.previous(1);
    }
    if input.just_pressed(Key::Right) {
        state.selection.next(2);
    }
    if input.just_pressed(Key::Left) {
        state.selection.previous(2);
    }
    if input.just_pressed(Key::Enter) {
        reset_match(state, events);
    }
}

/// Fresh match: zero the score, rebuild paddles and ball, start playing
pub fn reset_match(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.score.reset();
    state.winner = None;

    let right_controller = match (state.mode, state.difficulty) {
        (Some(GameMode::Pve), Some(difficulty)) => Controller::Ai {
            difficulty: state.settings.difficulty.multiplier(difficulty),
        },
        (Some(GameMode::Pve), None) => Controller::Ai {
            difficulty: state.settings.difficulty.multiplier(Difficulty::default()),
        },
        _ => Controller::Human,
    };
    state.paddles = [
        Paddle::new(Side::Left, Controller::Human, &state.settings),
        Paddle::new(Side::Right, right_controller, &state.settings),
    ];
    state.ball = Ball::new(&state.settings);

    state.match_time = 0.0;
    state.set_phase(GamePhase::Playing, events);
    log::info!(
        "Match start: {:?}{} ({} vs {})",
        state.mode.unwrap_or(GameMode::Pvp),
        state
            .difficulty
            .filter(|_| state.mode == Some(GameMode::Pve))
            .map(|d| format!(" {}", d.as_str()))
            .unwrap_or_default(),
        super::state::character(state.selection.p1).team,
        super::state::character(state.selection.p2).team,
    );
    reset_round(state, events);
}

/// Next kick-off: ball to the centre served toward `serve_toward`, paddles
/// home, pickup and trail cleared
pub fn reset_round(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let toward = state.serve_toward;
    state.ball.reset(toward, &mut state.rng);
    for paddle in &mut state.paddles {
        paddle.reset_position();
    }
    state.powerups.deactivate();
    state.trail_effect_timer = 0.0;
    state.trail_spawn_timer = 0.0;
    log::debug!("Kick-off toward {:?}", toward);
    events.push(GameEvent::KickOff);
}

/// Score a goal and move to the goal pause or the end of the match
pub fn score_goal(state: &mut GameState, goal: GoalFor, events: &mut Vec<GameEvent>) {
    let scorer = goal.side();
    if state.settings.screen_shake {
        state.screen_shake_timer = crate::consts::SCREEN_SHAKE_DURATION;
    }
    // The side that conceded receives the next serve
    state.serve_toward = scorer.opposite();
    let total = state.score.increment(scorer);
    events.push(GameEvent::Goal { scorer });
    log::info!(
        "Goal {:?}! {} - {}",
        scorer,
        state.score.left,
        state.score.right
    );

    if total >= state.settings.max_score {
        state.winner = Some(scorer);
        state.set_phase(GamePhase::GameOver, events);
        events.push(GameEvent::MatchOver { winner: scorer });
        log::info!(
            "Match over: {:?} wins {} - {} after {}",
            scorer,
            state.score.left,
            state.score.right,
            crate::format_match_time(state.match_time)
        );
    } else {
        state.goal_pause_timer = state.settings.goal_pause;
        state.set_phase(GamePhase::Goal, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), 1234)
    }

    fn press(state: &mut GameState, keys: &[Key]) -> Vec<GameEvent> {
        let mut events = Vec::new();
        handle_input(state, &TickInput::with_presses(keys), 0.0, &mut events);
        events
    }

    #[test]
    fn test_main_menu_choices() {
        let mut state = new_state();
        press(&mut state, &[Key::Num1]);
        assert_eq!(state.phase, GamePhase::CharacterSelection);
        assert_eq!(state.mode, Some(GameMode::Pve));

        let mut state = new_state();
        press(&mut state, &[Key::Num2]);
        assert_eq!(state.mode, Some(GameMode::Pvp));

        let mut state = new_state();
        press(&mut state, &[Key::Num3]);
        assert_eq!(state.phase, GamePhase::Rules);
        assert_eq!(state.mode, None);
    }

    #[test]
    fn test_pvp_flow_starts_match() {
        let mut state = new_state();
        press(&mut state, &[Key::Num2]);
        press(&mut state, &[Key::D]);
        press(&mut state, &[Key::Left]);
        assert_eq!(state.selection.p1, 1);
        assert_eq!(state.selection.p2, 0);

        let events = press(&mut state, &[Key::Enter]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.mode, Some(GameMode::Pvp));
        assert_eq!((state.score.left, state.score.right), (0, 0));
        assert!(!state.paddles[1].is_ai());
        assert!(events.contains(&GameEvent::KickOff));
    }

    #[test]
    fn test_pve_flow_needs_two_confirms_and_difficulty() {
        let mut state = new_state();
        press(&mut state, &[Key::Num1]);
        press(&mut state, &[Key::Right]);
        assert_eq!(state.selection.p1, 1);

        press(&mut state, &[Key::Enter]);
        assert_eq!(state.phase, GamePhase::CharacterSelection);
        assert_eq!(state.selection.selecting_for, 2);
        press(&mut state, &[Key::Left]);
        press(&mut state, &[Key::Left]);
        assert_eq!(state.selection.p2, 5);

        press(&mut state, &[Key::Enter]);
        assert_eq!(state.phase, GamePhase::DifficultyMenu);

        press(&mut state, &[Key::Enter]);
        assert_eq!(state.phase, GamePhase::DifficultyMenu);

        press(&mut state, &[Key::Num3]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Some(Difficulty::Hard));
        assert_eq!(state.paddles[1].controller, Controller::Ai { difficulty: 1.0 });
    }

    #[test]
    fn test_pause_resume_and_restart() {
        let mut state = new_state();
        press(&mut state, &[Key::Num2]);
        press(&mut state, &[Key::Enter]);

        press(&mut state, &[Key::P]);
        assert_eq!(state.phase, GamePhase::Paused);
        press(&mut state, &[Key::P]);
        assert_eq!(state.phase, GamePhase::Playing);

        state.score.left = 3;
        state.match_time = 42.0;
        press(&mut state, &[Key::P]);
        press(&mut state, &[Key::R]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.left, 0);
        assert_eq!(state.match_time, 0.0);
    }

    #[test]
    fn test_escape_returns_to_menu_then_quits() {
        let mut state = new_state();
        press(&mut state, &[Key::Num1]);
        press(&mut state, &[Key::Enter]);
        assert_eq!(state.selection.selecting_for, 2);

        press(&mut state, &[Key::Escape]);
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert_eq!(state.selection.selecting_for, 1);
        assert!(!state.quit_requested);

        let events = press(&mut state, &[Key::Escape]);
        assert!(state.quit_requested);
        assert_eq!(events, vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_irrelevant_keys_ignored() {
        let mut state = new_state();
        let events = press(&mut state, &[Key::P, Key::R, Key::Enter, Key::Left]);
        assert_eq!(state.phase, GamePhase::MainMenu);
        assert!(events.is_empty());

        press(&mut state, &[Key::Num3]);
        press(&mut state, &[Key::Num1, Key::Enter]);
        assert_eq!(state.phase, GamePhase::Rules);
    }

    #[test]
    fn test_goal_reaching_max_score_ends_match() {
        let mut state = new_state();
        press(&mut state, &[Key::Num2]);
        press(&mut state, &[Key::Enter]);
        state.score.left = 4;

        let mut events = Vec::new();
        score_goal(&mut state, GoalFor::Left, &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.winner, Some(Side::Left));
        assert_eq!((state.score.left, state.score.right), (5, 0));
        assert!(events.contains(&GameEvent::MatchOver { winner: Side::Left }));

        press(&mut state, &[Key::Enter]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.winner, None);
        assert_eq!(state.score.left, 0);
    }

    #[test]
    fn test_goal_below_max_pauses_and_serves_to_conceder() {
        let mut state = new_state();
        press(&mut state, &[Key::Num2]);
        press(&mut state, &[Key::Enter]);

        let mut events = Vec::new();
        score_goal(&mut state, GoalFor::Right, &mut events);
        assert_eq!(state.phase, GamePhase::Goal);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.score.left, 0);
        assert_eq!(state.serve_toward, Side::Left);
        assert_eq!(state.goal_pause_timer, state.settings.goal_pause);
        assert!(state.screen_shake_timer > 0.0);

        reset_round(&mut state, &mut events);
        assert!(state.ball.vel.x < 0.0);
    }
}
