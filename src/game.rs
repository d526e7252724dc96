//! Frame loop
//!
//! One frame: sample input, step the simulation, draw the snapshot, play the
//! sounds for whatever happened.

use std::thread;
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::consts::MAX_FRAME_DT;
use crate::input::{InputTracker, Keyboard};
use crate::render::Renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};
use crate::snapshot::FrameSnapshot;

/// Source of frame times
pub trait Clock {
    /// Seconds since the previous call
    fn tick(&mut self) -> f32;
}

/// Wall clock that sleeps to hold the frame rate at `fps` (0 = uncapped)
#[derive(Debug)]
pub struct FrameLimiter {
    fps: u32,
    last: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self { fps, last: None }
    }

    fn frame_budget(&self) -> Option<Duration> {
        (self.fps > 0).then(|| Duration::from_secs_f64(1.0 / self.fps as f64))
    }
}

impl Clock for FrameLimiter {
    fn tick(&mut self) -> f32 {
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return 0.0;
        };

        if let Some(budget) = self.frame_budget() {
            let elapsed = last.elapsed();
            if elapsed < budget {
                thread::sleep(budget - elapsed);
            }
        }

        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last).as_secs_f32()
    }
}

/// Constant frame time, no sleeping
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt: dt.max(0.0) }
    }

    /// One frame at the given rate
    pub fn from_fps(fps: u32) -> Self {
        Self::new(1.0 / fps.max(1) as f32)
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.dt
    }
}

/// A running session: simulation plus its input, audio and renderer
pub struct Game<R: Renderer> {
    state: GameState,
    tracker: InputTracker,
    audio: AudioManager,
    renderer: R,
}

impl<R: Renderer> Game<R> {
    pub fn new(settings: Settings, seed: u64, audio: AudioManager, renderer: R) -> Self {
        log::info!(
            "{} {}x{} (first to {}), seed {}",
            settings.window_title,
            settings.window_width,
            settings.window_height,
            settings.max_score,
            seed
        );
        Self {
            state: GameState::new(settings, seed),
            tracker: InputTracker::new(),
            audio,
            renderer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested
    }

    /// Run one frame of `dt` seconds and return its events
    pub fn frame(&mut self, keyboard: &impl Keyboard, dt: f32) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let input = self.tracker.sample(keyboard);
        let events = tick(&mut self.state, &input, dt);

        for event in &events {
            log::trace!("frame {}: {:?}", self.state.time_ticks, event);
        }

        if !self.state.quit_requested {
            self.renderer.draw(&FrameSnapshot::capture(&self.state));
        }
        self.audio.handle_events(&events);
        events
    }

    /// Loop until quit is requested or `max_frames` have run.
    /// Returns the number of frames run.
    pub fn run(
        &mut self,
        clock: &mut impl Clock,
        keyboard: &mut impl Keyboard,
        max_frames: Option<u64>,
    ) -> u64 {
        let mut frames = 0;
        while !self.quit_requested() && max_frames.is_none_or(|max| frames < max) {
            keyboard.pump();
            let dt = clock.tick();
            self.frame(keyboard, dt);
            frames += 1;
        }
        log::info!(
            "Session ended after {} frames ({} - {})",
            frames,
            self.state.score.left,
            self.state.score.right
        );
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{HeldKeys, Key};
    use crate::sim::{GameMode, GamePhase};

    #[derive(Default)]
    struct CountingRenderer {
        frames: Vec<GamePhase>,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, frame: &FrameSnapshot) {
            self.frames.push(frame.phase);
        }
    }

    /// Presses one key per pumped frame from a queue, releasing in between
    struct Script {
        keys: HeldKeys,
        queue: Vec<Key>,
        release: bool,
    }

    impl Keyboard for Script {
        fn key_pressed(&self, key: Key) -> bool {
            self.keys.key_pressed(key)
        }

        fn pump(&mut self) {
            self.keys.release_all();
            if !self.release && !self.queue.is_empty() {
                self.keys.press(self.queue.remove(0));
            }
            self.release = !self.release;
        }
    }

    fn game() -> Game<CountingRenderer> {
        Game::new(Settings::default(), 21, AudioManager::silent(), CountingRenderer::default())
    }

    #[test]
    fn test_fixed_clock() {
        let mut clock = FixedClock::from_fps(120);
        assert!((clock.tick() - 1.0 / 120.0).abs() < 1e-7);
        assert_eq!(FixedClock::new(-1.0).tick(), 0.0);
    }

    #[test]
    fn test_frame_limiter_holds_rate() {
        let mut clock = FrameLimiter::new(100);
        assert_eq!(clock.tick(), 0.0);
        let dt = clock.tick();
        assert!(dt >= 0.0099, "dt {}", dt);
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut game = game();
        let mut keys = HeldKeys::new();
        keys.press(Key::Num2);
        game.frame(&keys, 0.01);
        assert_eq!(game.state().phase, GamePhase::CharacterSelection);

        // Still held: Enter alone starts the match, Num2 is not re-read
        keys.press(Key::Enter);
        game.frame(&keys, 0.01);
        assert_eq!(game.state().phase, GamePhase::Playing);
        game.frame(&keys, 0.01);
        assert_eq!(game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut game = game();
        let mut keys = HeldKeys::new();
        keys.press(Key::Num2);
        game.frame(&keys, 0.0);
        keys.release_all();
        keys.press(Key::Enter);
        game.frame(&keys, 0.0);
        keys.release_all();

        game.frame(&keys, 5.0);
        assert!((game.state().match_time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_run_until_quit() {
        let mut game = game();
        let mut script = Script {
            keys: HeldKeys::new(),
            queue: vec![Key::Num2, Key::Enter, Key::Escape, Key::Escape],
            release: false,
        };
        let frames = game.run(&mut FixedClock::from_fps(60), &mut script, Some(1000));

        assert!(game.quit_requested());
        assert_eq!(frames, 7);
        assert_eq!(game.state().mode, Some(GameMode::Pvp));
        let drawn = &game.renderer().frames;
        assert_eq!(drawn.len(), 6);
        assert!(drawn.contains(&GamePhase::Playing));
        assert_eq!(drawn.last(), Some(&GamePhase::MainMenu));
    }

    #[test]
    fn test_run_respects_frame_cap() {
        let mut game = game();
        let frames = game.run(&mut FixedClock::from_fps(60), &mut HeldKeys::new(), Some(30));
        assert_eq!(frames, 30);
        assert!(!game.quit_requested());
        assert_eq!(game.renderer().frames.len(), 30);
    }
}
