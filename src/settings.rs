//! Demo host settings with persistence
//!
//! Settings are saved to `~/.config/cadence/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Everything the demo needs to find its clips and drive the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Clip manifest to load
    pub manifest: PathBuf,
    /// Where volume preferences live (defaults to the config directory)
    pub preferences: Option<PathBuf>,
    /// Crossfade length in seconds when switching tracks
    pub crossfade_seconds: f32,
    /// How long each track plays before the demo moves on
    pub track_seconds: f32,
    /// Frame rate of the tick loop
    pub ticks_per_second: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("clips.toml"),
            preferences: None,
            crossfade_seconds: 2.0,
            track_seconds: 8.0,
            ticks_per_second: 60,
        }
    }
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cadence"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Frame length in seconds
    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.ticks_per_second.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: DemoSettings = toml::from_str("manifest = \"assets/clips.toml\"").unwrap();
        assert_eq!(settings.manifest, PathBuf::from("assets/clips.toml"));
        assert_eq!(settings.ticks_per_second, 60);
        assert!(settings.preferences.is_none());
    }

    #[test]
    fn frame_seconds_never_divides_by_zero() {
        let settings = DemoSettings {
            ticks_per_second: 0,
            ..Default::default()
        };
        assert_eq!(settings.frame_seconds(), 1.0);
    }
}
