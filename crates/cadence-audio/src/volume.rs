use tracing::debug;

use crate::config::{
    clamp_volume, key_table_is_valid, AudioConfig, Channel, VolumeCategory, DEFAULT_VOLUME,
};
use crate::prefs::Preferences;

/// Master, music and sfx volumes, mirrored to a [`Preferences`] provider.
pub struct VolumeStore {
    config: AudioConfig,
    prefs: Box<dyn Preferences>,
}

impl VolumeStore {
    /// Restore every category from `prefs`, defaulting to 1.0.
    pub fn load(prefs: impl Preferences + 'static) -> Self {
        debug_assert!(key_table_is_valid(), "volume keys must be distinct");

        let mut config = AudioConfig::default();
        for category in VolumeCategory::ALL {
            let stored = prefs.get_float(category.key(), DEFAULT_VOLUME);
            let value = if stored.is_finite() {
                clamp_volume(stored)
            } else {
                DEFAULT_VOLUME
            };
            *config.slot_mut(category) = value;
        }
        debug!(?config, "Restored volume settings");

        Self {
            config,
            prefs: Box::new(prefs),
        }
    }

    /// Clamp, store and persist a volume. Returns the value actually stored.
    pub fn set(&mut self, category: VolumeCategory, value: f32) -> f32 {
        let value = clamp_volume(value);
        *self.config.slot_mut(category) = value;
        self.prefs.set_float(category.key(), value);
        value
    }

    pub fn get(&self, category: VolumeCategory) -> f32 {
        self.config.get(category)
    }

    /// Category volume times master volume.
    pub fn effective(&self, channel: Channel) -> f32 {
        self.config.effective(channel)
    }

    pub fn config(&self) -> AudioConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;

    #[test]
    fn defaults_to_full_volume() {
        let store = VolumeStore::load(MemoryPreferences::new());
        for category in VolumeCategory::ALL {
            assert_eq!(store.get(category), 1.0);
        }
    }

    #[test]
    fn set_always_clamps() {
        let mut store = VolumeStore::load(MemoryPreferences::new());
        for (input, expected) in [(-0.5, 0.0), (0.0, 0.0), (0.42, 0.42), (1.0, 1.0), (12.0, 1.0)] {
            assert_eq!(store.set(VolumeCategory::Music, input), expected);
            assert_eq!(store.get(VolumeCategory::Music), expected);
        }
    }

    #[test]
    fn persists_under_category_key() {
        let prefs = MemoryPreferences::new();
        let mut store = VolumeStore::load(prefs.clone());
        store.set(VolumeCategory::Sfx, 0.35);
        store.set(VolumeCategory::Master, 2.0);

        assert_eq!(prefs.get("SFXVolumeKey"), Some(0.35));
        assert_eq!(prefs.get("masterVolumeKey"), Some(1.0));
        assert_eq!(prefs.get("musicVolumeKey"), None);
    }

    #[test]
    fn fresh_store_restores_saved_values() {
        let prefs = MemoryPreferences::new();
        let mut store = VolumeStore::load(prefs.clone());
        store.set(VolumeCategory::Music, 0.6);
        store.set(VolumeCategory::Sfx, -1.0);

        let restored = VolumeStore::load(prefs);
        assert_eq!(restored.get(VolumeCategory::Music), 0.6);
        assert_eq!(restored.get(VolumeCategory::Sfx), 0.0);
        assert_eq!(restored.get(VolumeCategory::Master), 1.0);
    }

    #[test]
    fn bad_stored_values_are_tolerated() {
        let mut prefs = MemoryPreferences::new();
        prefs.set_float("masterVolumeKey", f32::NAN);
        prefs.set_float("musicVolumeKey", 4.0);

        let store = VolumeStore::load(prefs);
        assert_eq!(store.get(VolumeCategory::Master), 1.0);
        assert_eq!(store.get(VolumeCategory::Music), 1.0);
    }

    #[test]
    fn effective_volume() {
        let mut store = VolumeStore::load(MemoryPreferences::new());
        store.set(VolumeCategory::Master, 0.5);
        store.set(VolumeCategory::Music, 0.5);
        assert_eq!(store.effective(Channel::Music), 0.25);
        assert_eq!(store.effective(Channel::Sfx), 0.5);
    }
}
