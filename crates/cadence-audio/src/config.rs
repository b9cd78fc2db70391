use std::fmt;

/// Volume used for any category with no stored setting.
pub const DEFAULT_VOLUME: f32 = 1.0;

/// A volume-scoping bucket. Music and SFX are scaled by Master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeCategory {
    Master,
    Music,
    Sfx,
}

impl VolumeCategory {
    pub const ALL: [VolumeCategory; 3] = [Self::Master, Self::Music, Self::Sfx];

    /// Persistence key this category is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Self::Master => "masterVolumeKey",
            Self::Music => "musicVolumeKey",
            Self::Sfx => "SFXVolumeKey",
        }
    }

    /// The playback channel scaled by this category, if any.
    pub fn channel(self) -> Option<Channel> {
        match self {
            Self::Master => None,
            Self::Music => Some(Channel::Music),
            Self::Sfx => Some(Channel::Sfx),
        }
    }
}

/// Checks that every category maps to a distinct, non-empty key.
pub(crate) fn key_table_is_valid() -> bool {
    let keys = VolumeCategory::ALL.map(VolumeCategory::key);
    keys.iter().enumerate().all(|(i, key)| {
        !key.is_empty() && keys[i + 1..].iter().all(|other| other != key)
    })
}

/// A playback output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Music,
    Sfx,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Self::Music, Self::Sfx];

    /// The volume category that scales this channel.
    pub fn category(self) -> VolumeCategory {
        match self {
            Self::Music => VolumeCategory::Music,
            Self::Sfx => VolumeCategory::Sfx,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Music => 0,
            Self::Sfx => 1,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Music => f.write_str("music"),
            Self::Sfx => f.write_str("sfx"),
        }
    }
}

/// Clamp a volume into [0, 1]. NaN becomes silence.
pub fn clamp_volume(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Audio volume configuration snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioConfig {
    /// Master volume multiplier (0.0–1.0).
    pub master_volume: f32,
    /// Music volume multiplier (0.0–1.0).
    pub music_volume: f32,
    /// Sound effects volume multiplier (0.0–1.0).
    pub sfx_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: DEFAULT_VOLUME,
            music_volume: DEFAULT_VOLUME,
            sfx_volume: DEFAULT_VOLUME,
        }
    }
}

impl AudioConfig {
    /// Effective music volume (master * music).
    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    /// Effective SFX volume (master * sfx).
    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Effective volume for a playback channel.
    pub fn effective(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Music => self.effective_music_volume(),
            Channel::Sfx => self.effective_sfx_volume(),
        }
    }

    pub fn get(&self, category: VolumeCategory) -> f32 {
        match category {
            VolumeCategory::Master => self.master_volume,
            VolumeCategory::Music => self.music_volume,
            VolumeCategory::Sfx => self.sfx_volume,
        }
    }

    pub(crate) fn slot_mut(&mut self, category: VolumeCategory) -> &mut f32 {
        match category {
            VolumeCategory::Master => &mut self.master_volume,
            VolumeCategory::Music => &mut self.music_volume,
            VolumeCategory::Sfx => &mut self.sfx_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_volumes() {
        let config = AudioConfig::default();
        assert_eq!(config.master_volume, 1.0);
        assert_eq!(config.music_volume, 1.0);
        assert_eq!(config.sfx_volume, 1.0);
    }

    #[test]
    fn effective_volumes() {
        let config = AudioConfig {
            master_volume: 0.5,
            music_volume: 0.8,
            sfx_volume: 0.6,
        };
        assert!((config.effective_music_volume() - 0.4).abs() < f32::EPSILON);
        assert!((config.effective_sfx_volume() - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.effective(Channel::Music), config.effective_music_volume());
    }

    #[test]
    fn keys_are_fixed_and_distinct() {
        assert_eq!(VolumeCategory::Master.key(), "masterVolumeKey");
        assert_eq!(VolumeCategory::Music.key(), "musicVolumeKey");
        assert_eq!(VolumeCategory::Sfx.key(), "SFXVolumeKey");
        assert!(key_table_is_valid());
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_volume(-3.0), 0.0);
        assert_eq!(clamp_volume(0.25), 0.25);
        assert_eq!(clamp_volume(7.5), 1.0);
        assert_eq!(clamp_volume(f32::INFINITY), 1.0);
        assert_eq!(clamp_volume(f32::NAN), 0.0);
    }

    #[test]
    fn channel_category_mapping() {
        for channel in Channel::ALL {
            assert_eq!(channel.category().channel(), Some(channel));
        }
        assert_eq!(VolumeCategory::Master.channel(), None);
    }
}
