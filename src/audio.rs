//! Sound cue triggers
//!
//! The simulation only says "play cue X now". [`AudioManager`] is the seam
//! where a playback backend plugs in; without one it logs each cue.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect cues raised by gameplay events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player jumped
    Jump,
    /// Any projectile fired
    Shoot,
    /// Something took damage (hazard, enemy contact, projectile)
    Hit,
    /// Collectible picked up
    Coin,
    /// Exit portal touched
    Portal,
    /// Level complete screen shown
    LevelComplete,
}

impl SoundCue {
    /// Asset the presentation layer should play for this cue
    pub fn asset(self) -> &'static str {
        match self {
            SoundCue::Jump => "assets/jump.wav",
            SoundCue::Shoot => "assets/shoot.wav",
            SoundCue::Hit => "assets/hit.wav",
            SoundCue::Coin => "assets/coin.wav",
            SoundCue::Portal => "assets/portal.wav",
            SoundCue::LevelComplete => "assets/level_complete.wav",
        }
    }
}

/// Audio state for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    music_volume: f32,
    muted: bool,
    music_paused: bool,
    /// Cues dispatched so far (for diagnostics)
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music_paused: false,
            played: 0,
        }
    }

    /// Pick up volume and music state from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.music_paused = settings.music_paused;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn music_paused(&self) -> bool {
        self.music_paused
    }

    pub fn played(&self) -> u64 {
        self.played
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("cue {:?} ({}) at volume {:.2}", cue, cue.asset(), vol);
    }

    /// Play every cue raised during a frame, in order
    pub fn dispatch(&mut self, cues: &[SoundCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_cues_are_dropped() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        audio.dispatch(&[SoundCue::Jump, SoundCue::Coin]);
        assert_eq!(audio.played(), 0);

        audio.set_muted(false);
        audio.dispatch(&[SoundCue::Jump, SoundCue::Coin]);
        assert_eq!(audio.played(), 2);
    }

    #[test]
    fn test_apply_settings_clamps_music_volume() {
        let mut audio = AudioManager::new();
        let settings = Settings {
            music_volume: 3.0,
            music_paused: true,
            ..Settings::default()
        };
        audio.apply_settings(&settings);
        assert_eq!(audio.music_volume(), 1.0);
        assert!(audio.music_paused());
    }
}
