//! Game settings and preferences
//!
//! Persisted as a small JSON file next to the executable. A missing or
//! corrupt file falls back to defaults with a warning; the game never fails
//! to start over settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all audio
    pub muted: bool,

    // === Tracking ===
    /// Multiplier from nose pixel offset to screen x. The default maps a
    /// 640-wide camera frame onto the 800-wide playfield with headroom.
    pub tracking_gain: f32,

    // === Background ===
    /// Number of starfield dots
    pub star_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            tracking_gain: 2.0,
            star_count: 100,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, defaulting on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Settings file {} is corrupt ({err}), using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as JSON; failure is logged, not fatal
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("Could not save settings to {}: {err}", path.display());
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(err) => log::warn!("Could not serialize settings: {err}"),
        }
    }
}
