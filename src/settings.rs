//! Game settings and preferences
//!
//! Persisted as JSON next to the run log. Loading never fails loudly: any
//! missing or corrupt file falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute everything
    pub muted: bool,

    // === Visuals ===
    /// Dust particle effects
    pub particles: bool,
    /// Minimize camera lead and shake
    pub reduced_motion: bool,
    /// Camera smoothing factor override (0..=1)
    pub camera_smoothing: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            particles: true,
            reduced_motion: false,
            camera_smoothing: crate::camera::DEFAULT_SMOOTHING,
        }
    }
}

impl Settings {
    /// Load from a JSON file, defaulting on any error
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file unreadable ({err}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save as JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }

    /// Effective camera smoothing (reduced motion snaps harder)
    pub fn effective_camera_smoothing(&self) -> f32 {
        if self.reduced_motion {
            1.0
        } else {
            self.camera_smoothing.clamp(0.0, 1.0)
        }
    }
}
