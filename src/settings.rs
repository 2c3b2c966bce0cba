//! Game settings and preferences
//!
//! Persisted as JSON in the user's home directory; loading is forgiving and
//! saving is best-effort. Game state itself is never persisted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Start with the diagnostics overlay (FPS counter) visible
    pub show_diagnostics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            show_diagnostics: false,
        }
    }
}

impl Settings {
    fn path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".egg-storm.json")
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::path()) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", Self::path().display());
                    settings
                }
                Err(e) => {
                    log::warn!("settings file unreadable ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist settings; failures are logged and ignored
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(Self::path(), json) {
                    log::warn!("could not save settings: {e}");
                }
            }
            Err(e) => log::warn!("could not serialize settings: {e}"),
        }
    }
}
