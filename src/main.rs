//! FutePong entry point
//!
//! There is no window backend in this build, so the binary runs an attract
//! mode: it walks the menus into a PVE match, leaves the left paddle idle
//! while the AI plays, and quits once the match is over.
//!
//! Usage: `futepong [settings.json]` (log level via `RUST_LOG`)

use std::path::PathBuf;

use futepong::audio::AudioManager;
use futepong::input::{HeldKeys, Key, Keyboard};
use futepong::render::LogRenderer;
use futepong::sim::GamePhase;
use futepong::{Clock, FixedClock, Game, Settings, format_match_time};

/// Upper bound on attract-mode length (simulated seconds)
const ATTRACT_MAX_SECONDS: u64 = 15 * 60;

/// Keyboard that navigates the menus on its own.
/// Keys are tapped on alternate frames so every tap is a fresh press.
struct AttractKeyboard {
    keys: HeldKeys,
    phase: GamePhase,
    match_played: bool,
    tapped_last_frame: bool,
}

impl AttractKeyboard {
    fn new() -> Self {
        Self {
            keys: HeldKeys::new(),
            phase: GamePhase::MainMenu,
            match_played: false,
            tapped_last_frame: false,
        }
    }

    fn observe(&mut self, phase: GamePhase) {
        if phase == GamePhase::Playing {
            self.match_played = true;
        }
        self.phase = phase;
    }

    fn next_key(&self) -> Option<Key> {
        match self.phase {
            GamePhase::MainMenu if self.match_played => Some(Key::Escape),
            GamePhase::MainMenu => Some(Key::Num1),
            GamePhase::CharacterSelection => Some(Key::Enter),
            GamePhase::DifficultyMenu => Some(Key::Num2),
            GamePhase::GameOver => Some(Key::Escape),
            _ => None,
        }
    }
}

impl Keyboard for AttractKeyboard {
    fn key_pressed(&self, key: Key) -> bool {
        self.keys.key_pressed(key)
    }

    fn pump(&mut self) {
        self.keys.release_all();
        if self.tapped_last_frame {
            self.tapped_last_frame = false;
            return;
        }
        if let Some(key) = self.next_key() {
            self.keys.press(key);
            self.tapped_last_frame = true;
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("FutePong (headless attract mode) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    let seed: u64 = rand::random();
    let fps = settings.fps_limit.max(1);
    let max_frames = ATTRACT_MAX_SECONDS * fps as u64;
    let mut clock = FixedClock::from_fps(fps);

    log::info!("No audio device in headless mode - sound disabled");
    let mut game = Game::new(settings, seed, AudioManager::silent(), LogRenderer::default());
    let mut keyboard = AttractKeyboard::new();

    let mut frames = 0;
    while !game.quit_requested() && frames < max_frames {
        keyboard.observe(game.state().phase);
        keyboard.pump();
        game.frame(&keyboard, clock.tick());
        frames += 1;
    }
    if !game.quit_requested() {
        log::warn!("Attract mode stopped after {} frames without finishing", frames);
    }

    let state = game.state();
    println!(
        "Final score: {} {} - {} {} ({})",
        futepong::sim::character(state.selection.p1).team,
        state.score.left,
        state.score.right,
        futepong::sim::character(state.selection.p2).team,
        format_match_time(state.match_time)
    );
}
