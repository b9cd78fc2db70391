//! Key-value persistence for volume settings
//!
//! [`TomlPreferences`] keeps values in `~/.config/<app>/audio.toml` (or any path you give it).
//! [`MemoryPreferences`] keeps them in a shared map, which is handy for tests and for hosts
//! that persist settings themselves.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::AudioError;

/// A float key-value store that outlives a single session.
pub trait Preferences {
    /// Read `key`, falling back to `default` if it is missing or unreadable.
    fn get_float(&self, key: &str, default: f32) -> f32;

    /// Write `key`. Failures are the provider's problem and are never reported back.
    fn set_float(&mut self, key: &str, value: f32);
}

impl<P: Preferences + ?Sized> Preferences for Box<P> {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        (**self).get_float(key, default)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        (**self).set_float(key, value)
    }
}

/// In-memory preferences. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: Arc<Mutex<HashMap<String, f32>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, if any.
    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.lock().get(key).copied()
    }
}

impl Preferences for MemoryPreferences {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.get(key).unwrap_or(default)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.values.lock().insert(key.to_string(), value);
    }
}

/// Preferences persisted to a TOML file, written through on every change.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    path: PathBuf,
    table: toml::Table,
}

impl TomlPreferences {
    /// Preferences stored at `<config dir>/<app>/audio.toml`.
    pub fn in_config_dir(app: &str) -> Option<Self> {
        let Some(dir) = dirs::config_dir() else {
            warn!("Could not determine config directory");
            return None;
        };
        Some(Self::open(dir.join(app).join("audio.toml")))
    }

    /// Load preferences from `path`, or start empty if the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = Self::read_table(&path);
        Self { path, table }
    }

    fn read_table(path: &Path) -> toml::Table {
        if !path.exists() {
            info!("No audio preferences at {:?}, using defaults", path);
            return toml::Table::new();
        }

        match fs::read_to_string(path) {
            Ok(content) => match content.parse::<toml::Table>() {
                Ok(table) => {
                    info!("Loaded audio preferences from {:?}", path);
                    table
                }
                Err(e) => {
                    warn!("Failed to parse audio preferences: {}, using defaults", e);
                    toml::Table::new()
                }
            },
            Err(e) => {
                warn!("Failed to read audio preferences: {}, using defaults", e);
                toml::Table::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current values to disk.
    pub fn save(&self) -> Result<(), AudioError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| AudioError::Io(dir.to_path_buf(), e))?;
            }
        }

        let content = toml::to_string_pretty(&self.table)
            .map_err(|e| AudioError::Preferences(self.path.clone(), e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| AudioError::Io(self.path.clone(), e))?;
        debug!("Saved audio preferences to {:?}", self.path);
        Ok(())
    }
}

impl Preferences for TomlPreferences {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        let value = match self.table.get(key) {
            Some(toml::Value::Float(f)) => *f as f32,
            Some(toml::Value::Integer(i)) => *i as f32,
            Some(other) => {
                warn!("Ignoring non-numeric preference {} = {}", key, other);
                return default;
            }
            None => return default,
        };

        if value.is_finite() {
            value
        } else {
            default
        }
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.table
            .insert(key.to_string(), toml::Value::Float(value as f64));
        if let Err(e) = self.save() {
            warn!("Failed to persist preference {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cadence-prefs-{}-{}", std::process::id(), name))
            .join("audio.toml")
    }

    #[test]
    fn memory_defaults_and_sharing() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.get_float("missing", 0.7), 0.7);

        let other = prefs.clone();
        prefs.set_float("k", 0.25);
        assert_eq!(other.get_float("k", 1.0), 0.25);
    }

    #[test]
    fn toml_round_trip() {
        let path = scratch_path("round-trip");
        let _ = fs::remove_file(&path);

        let mut prefs = TomlPreferences::open(&path);
        assert_eq!(prefs.path(), path.as_path());
        assert_eq!(prefs.get_float("musicVolumeKey", 1.0), 1.0);
        prefs.set_float("musicVolumeKey", 0.3);

        let reopened = TomlPreferences::open(&path);
        assert_eq!(reopened.get_float("musicVolumeKey", 1.0), 0.3);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn toml_corrupt_file_falls_back() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is = = not toml").unwrap();

        let prefs = TomlPreferences::open(&path);
        assert_eq!(prefs.get_float("masterVolumeKey", 1.0), 1.0);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn toml_wrong_type_falls_back() {
        let path = scratch_path("wrong-type");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "SFXVolumeKey = \"loud\"\nmasterVolumeKey = 0\n").unwrap();

        let prefs = TomlPreferences::open(&path);
        assert_eq!(prefs.get_float("SFXVolumeKey", 1.0), 1.0);
        assert_eq!(prefs.get_float("masterVolumeKey", 1.0), 0.0);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
