//! Audio system
//!
//! Sound effects are short clips loaded once from the sound directory.
//! Decoding and playback belong to an `AudioBackend`; a clip that failed to
//! load is simply never played.

use std::path::Path;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Kick-off
    StartWhistle,
    /// Final whistle
    EndWhistle,
    /// Ball hits paddle
    Kick,
    /// Goal scored
    Goal,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::StartWhistle,
        SoundEffect::EndWhistle,
        SoundEffect::Kick,
        SoundEffect::Goal,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::StartWhistle => "apito_inicio.wav",
            SoundEffect::EndWhistle => "apito_fim.wav",
            SoundEffect::Kick => "chute.wav",
            SoundEffect::Goal => "gol.wav",
        }
    }

    /// Sound triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::KickOff => Some(SoundEffect::StartWhistle),
            GameEvent::PaddleHit { .. } => Some(SoundEffect::Kick),
            GameEvent::Goal { .. } => Some(SoundEffect::Goal),
            GameEvent::MatchOver { .. } => Some(SoundEffect::EndWhistle),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Handle to a clip loaded by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(pub u32);

/// Platform audio output
pub trait AudioBackend {
    /// Load a clip; `None` if it is missing or cannot be decoded
    fn load(&mut self, path: &Path) -> Option<ClipId>;
    /// Fire and forget
    fn play(&mut self, clip: ClipId, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    clips: [Option<ClipId>; 4],
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    /// Manager with no output at all
    pub fn silent() -> Self {
        Self {
            backend: None,
            clips: [None; 4],
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Load every clip from `settings.sound_dir` through `backend`
    pub fn new(mut backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let dir = Path::new(&settings.sound_dir);
        let mut clips = [None; 4];
        for effect in SoundEffect::ALL {
            let path = dir.join(effect.file_name());
            clips[effect.index()] = backend.load(&path);
            if clips[effect.index()].is_none() {
                log::warn!("Sound {:?} not loaded from {} - it will be silent", effect, path.display());
            }
        }

        let mut manager = Self {
            backend: Some(backend),
            clips,
            ..Self::silent()
        };
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn is_loaded(&self, effect: SoundEffect) -> bool {
        self.clips[effect.index()].is_some()
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(clip) = self.clips[effect.index()] else { return };
        let Some(backend) = self.backend.as_mut() else { return };
        backend.play(clip, vol);
    }

    /// Play the sounds for a frame's events, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
