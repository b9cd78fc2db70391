//! Cadence Audio - Music and sound effect playback with persisted volumes
//!
//! Provides named clip lookup, master/music/sfx volume controls saved across sessions,
//! immediate or crossfaded music changes and one-shot effects. Playback goes through the
//! [`MusicPort`] and [`EffectPort`] traits; [`KiraBackend`] implements them with kira.

mod backend;
mod config;
mod engine;
mod error;
mod fade;
mod manifest;
mod music;
mod ports;
mod prefs;
mod registry;
mod sfx;
mod volume;

#[cfg(test)]
mod testing;

pub use backend::{ClipLoader, KiraBackend};
pub use config::{clamp_volume, AudioConfig, Channel, VolumeCategory, DEFAULT_VOLUME};
pub use engine::AudioEngine;
pub use error::AudioError;
pub use fade::{lerp, Crossfade, FadeCommand, FadeTask, LinearFade};
pub use manifest::{ClipEntry, ClipManifest};
pub use music::KiraMusicPort;
pub use ports::{EffectPort, MusicPort};
pub use prefs::{MemoryPreferences, Preferences, TomlPreferences};
pub use registry::ClipRegistry;
pub use sfx::KiraEffectPort;
pub use volume::VolumeStore;
