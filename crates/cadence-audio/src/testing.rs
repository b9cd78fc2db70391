//! Recording ports for engine tests.

use crate::engine::AudioEngine;
use crate::error::AudioError;
use crate::ports::{EffectPort, MusicPort};
use crate::prefs::MemoryPreferences;
use crate::registry::ClipRegistry;
use crate::volume::VolumeStore;

pub type RecordingEngine = AudioEngine<RecordingMusic, RecordingEffects>;

#[derive(Debug, Default)]
pub struct RecordingMusic {
    pub clip: Option<&'static str>,
    pub playing: bool,
    pub volume: f32,
    /// Every volume ever set, in order.
    pub volumes: Vec<f32>,
    /// Every clip started, in order.
    pub started: Vec<&'static str>,
}

impl MusicPort for RecordingMusic {
    type Clip = &'static str;

    fn set_clip(&mut self, clip: Self::Clip) {
        self.clip = Some(clip);
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let clip = self
            .clip
            .ok_or_else(|| AudioError::PlaybackFailed("no clip assigned".into()))?;
        self.started.push(clip);
        self.playing = true;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.volumes.push(volume);
    }
}

#[derive(Debug, Default)]
pub struct RecordingEffects {
    pub volume: f32,
    pub volumes: Vec<f32>,
    pub shots: Vec<(&'static str, f32)>,
}

impl EffectPort for RecordingEffects {
    type Clip = &'static str;

    fn play_one_shot(&mut self, clip: &Self::Clip, volume: f32) -> Result<(), AudioError> {
        self.shots.push((*clip, volume));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.volumes.push(volume);
    }
}

/// Music: calm, battle, boss. Effects: click, explosion.
pub fn engine_with(prefs: MemoryPreferences) -> RecordingEngine {
    let clips = ClipRegistry::from_lists(
        [("calm", "calm"), ("battle", "battle"), ("boss", "boss")],
        [("click", "click"), ("explosion", "explosion")],
    );
    AudioEngine::new(
        RecordingMusic::default(),
        RecordingEffects::default(),
        clips,
        VolumeStore::load(prefs),
    )
}
