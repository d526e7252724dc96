//! Renderer boundary
//!
//! Drawing is done by whatever implements `Renderer`; the game only hands it
//! a `FrameSnapshot` once per frame.

use crate::sim::GamePhase;
use crate::snapshot::FrameSnapshot;

pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Headless renderer that reports to the log: phase changes at info level
/// and a JSON dump of every `every`-th frame at trace level
#[derive(Debug)]
pub struct LogRenderer {
    every: u64,
    last_phase: Option<GamePhase>,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            last_phase: None,
            frames: 0,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(120)
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        if self.last_phase != Some(frame.phase) {
            log::info!(
                "[{}] {:?}  {} - {}",
                frame.clock,
                frame.phase,
                frame.score_left,
                frame.score_right
            );
            self.last_phase = Some(frame.phase);
        }

        if self.frames % self.every == 0 && log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(frame) {
                Ok(json) => log::trace!("{}", json),
                Err(e) => log::warn!("Failed to serialize frame: {}", e),
            }
        }
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameState;

    #[test]
    fn test_log_renderer_counts_frames() {
        let state = GameState::new(Settings::default(), 3);
        let mut renderer = LogRenderer::new(0);
        let frame = FrameSnapshot::capture(&state);
        for _ in 0..5 {
            renderer.draw(&frame);
        }
        assert_eq!(renderer.frames_drawn(), 5);
        assert_eq!(renderer.last_phase, Some(GamePhase::MainMenu));
    }
}
