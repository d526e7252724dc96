use futepong::audio::AudioManager;
use futepong::input::{HeldKeys, Key, TickInput};
use futepong::render::Renderer;
use futepong::sim::{GameEvent, GameMode, GamePhase, GameState, Side, tick};
use futepong::{FrameSnapshot, Game, Settings};

const DT: f32 = 1.0 / 120.0;

struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &FrameSnapshot) {}
}

fn press(state: &mut GameState, key: Key) -> Vec<GameEvent> {
    tick(state, &TickInput::with_presses(&[key]), DT)
}

/// Walk the menus into a PVE match on the given difficulty slot
fn start_pve(state: &mut GameState, difficulty: Key) {
    for key in [Key::Num1, Key::Enter, Key::Enter, difficulty] {
        press(state, key);
    }
    assert_eq!(state.phase, GamePhase::Playing);
}

/// Play with P1 holding W until the match ends; returns every event seen
fn play_out(state: &mut GameState, max_frames: usize) -> Vec<GameEvent> {
    let hold_up = TickInput {
        p1_up: true,
        ..Default::default()
    };
    let mut events = Vec::new();
    for _ in 0..max_frames {
        events.extend(tick(state, &hold_up, DT));
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    events
}

#[test]
fn test_main_menu_to_pvp_match() {
    let mut game = Game::new(Settings::default(), 1, AudioManager::silent(), NullRenderer);
    let mut keys = HeldKeys::new();

    keys.press(Key::Num2);
    game.frame(&keys, DT);
    keys.release_all();
    game.frame(&keys, DT);
    keys.press(Key::Enter);
    game.frame(&keys, DT);

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.mode, Some(GameMode::Pvp));
    assert_eq!((state.score.left, state.score.right), (0, 0));
}

#[test]
fn test_seeded_pve_match_plays_to_the_end() {
    let mut state = GameState::new(Settings::default(), 2024);
    start_pve(&mut state, Key::Num1);

    let events = play_out(&mut state, 120 * 60 * 30);
    assert_eq!(state.phase, GamePhase::GameOver);

    let max = state.settings.max_score;
    let winner = state.winner.expect("match has a winner");
    assert_eq!(state.score.get(winner), max);
    assert!(state.score.get(winner.opposite()) < max);

    let goals = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Goal { .. }))
        .count() as u32;
    assert_eq!(goals, state.score.left + state.score.right);

    // One kick-off per round; the last goal ends the match instead
    let kick_offs = events.iter().filter(|e| **e == GameEvent::KickOff).count() as u32;
    assert_eq!(kick_offs, goals - 1);

    let over: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MatchOver { .. }))
        .collect();
    assert_eq!(over, vec![&GameEvent::MatchOver { winner }]);
}

#[test]
fn test_same_seed_same_match() {
    let run = |seed: u64| {
        let mut state = GameState::new(Settings::default(), seed);
        start_pve(&mut state, Key::Num2);
        let events = play_out(&mut state, 120 * 30);
        (state.score, state.ball.pos, state.ball.vel, state.time_ticks, events)
    };
    let a = run(99);
    let b = run(99);
    assert_eq!(a.0, b.0);
    assert_eq!(a.1, b.1);
    assert_eq!(a.2, b.2);
    assert_eq!(a.3, b.3);
    assert_eq!(a.4, b.4);
}

#[test]
fn test_single_goal_match_from_settings_file() {
    let settings = Settings::from_json(r#"{ "max_score": 1, "goal_pause": 0.5 }"#)
        .expect("valid settings");
    let mut state = GameState::new(settings, 5);
    start_pve(&mut state, Key::Num3);

    let events = play_out(&mut state, 120 * 60 * 10);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.score.left + state.score.right, 1);
    assert!(!events.contains(&GameEvent::KickOff));

    // Enter starts a rematch with the same mode and difficulty
    let events = press(&mut state, Key::Enter);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.mode, Some(GameMode::Pve));
    assert_eq!(state.score.left + state.score.right, 0);
    assert!(events.contains(&GameEvent::KickOff));
}

#[test]
fn test_pause_escape_and_rules() {
    let mut state = GameState::new(Settings::default(), 8);
    press(&mut state, Key::Num2);
    press(&mut state, Key::Enter);

    press(&mut state, Key::P);
    assert_eq!(state.phase, GamePhase::Paused);
    press(&mut state, Key::Escape);
    assert_eq!(state.phase, GamePhase::MainMenu);

    press(&mut state, Key::Num3);
    assert_eq!(state.phase, GamePhase::Rules);
    press(&mut state, Key::Enter);
    assert_eq!(state.phase, GamePhase::Rules);
    press(&mut state, Key::Escape);
    assert_eq!(state.phase, GamePhase::MainMenu);
    assert!(!state.quit_requested);

    let events = press(&mut state, Key::Escape);
    assert!(state.quit_requested);
    assert!(events.contains(&GameEvent::QuitRequested));
}

#[test]
fn test_serve_goes_to_side_that_conceded() {
    let mut state = GameState::new(Settings::default(), 13);
    press(&mut state, Key::Num2);
    press(&mut state, Key::Enter);
    // First serve heads right
    assert!(state.ball.vel.x > 0.0);

    // Both paddles idle: play until the first goal
    let mut scorer = None;
    for _ in 0..120 * 60 {
        let events = tick(&mut state, &TickInput::default(), DT);
        scorer = events.iter().find_map(|e| match e {
            GameEvent::Goal { scorer } => Some(*scorer),
            _ => None,
        });
        if scorer.is_some() {
            break;
        }
    }
    let scorer = scorer.expect("a goal is scored");

    for _ in 0..200 {
        tick(&mut state, &TickInput::default(), DT);
        if state.phase == GamePhase::Playing {
            break;
        }
    }
    assert_eq!(state.phase, GamePhase::Playing);
    let toward = if state.ball.vel.x < 0.0 { Side::Left } else { Side::Right };
    assert_eq!(toward, scorer.opposite());
}
