//! Game settings and preferences
//!
//! Stored as JSON by whoever owns the filesystem; the core only converts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Window resolution presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    Hd,
    FullHd,
    Qhd,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Hd => "1280x720",
            Resolution::FullHd => "1920x1080",
            Resolution::Qhd => "2560x1440",
        }
    }

    /// (width, height) in pixels
    pub fn size(&self) -> (u32, u32) {
        match self {
            Resolution::Hd => (1280, 720),
            Resolution::FullHd => (1920, 1080),
            Resolution::Qhd => (2560, 1440),
        }
    }

    /// Next preset, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Resolution::Hd => Resolution::FullHd,
            Resolution::FullHd => Resolution::Qhd,
            Resolution::Qhd => Resolution::Hd,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `WIDTHxHEIGHT` or a preset alias (`720p`, `fullhd`, ...)
impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1280x720" | "hd" | "720p" => Ok(Resolution::Hd),
            "1920x1080" | "fullhd" | "1080p" => Ok(Resolution::FullHd),
            "2560x1440" | "qhd" | "1440p" => Ok(Resolution::Qhd),
            other => Err(format!(
                "unknown resolution '{other}' (expected 1280x720, 1920x1080 or 2560x1440)"
            )),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub resolution: Resolution,
    pub fullscreen: bool,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub music_paused: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: Resolution::Hd,
            fullscreen: false,
            music_volume: 0.5,
            music_paused: false,
        }
    }
}

impl Settings {
    /// Camera viewport width for the current resolution
    pub fn viewport_width(&self) -> f32 {
        self.resolution.size().0 as f32
    }

    pub fn cycle_resolution(&mut self) {
        self.resolution = self.resolution.next();
        log::info!("Resolution set to {}", self.resolution.as_str());
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn toggle_music(&mut self) {
        self.music_paused = !self.music_paused;
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, falling back to defaults on bad input
    pub fn load(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
