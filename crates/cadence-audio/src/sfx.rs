use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::sound::PlaybackState;
use kira::tween::Tween;

use crate::backend::SharedManager;
use crate::error::AudioError;
use crate::ports::EffectPort;

/// Fire-and-forget sound effects on a kira manager.
pub struct KiraEffectPort {
    manager: SharedManager,
    active: Vec<StaticSoundHandle>,
}

impl KiraEffectPort {
    pub(crate) fn new(manager: SharedManager) -> Self {
        Self {
            manager,
            active: Vec::new(),
        }
    }
}

impl EffectPort for KiraEffectPort {
    type Clip = StaticSoundData;

    fn play_one_shot(&mut self, clip: &StaticSoundData, volume: f32) -> Result<(), AudioError> {
        let settings = StaticSoundSettings::new().volume(volume as f64);
        let handle = self
            .manager
            .lock()
            .play(clip.clone().with_settings(settings))
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
        self.active.push(handle);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        for handle in &mut self.active {
            handle.set_volume(volume as f64, Tween::default());
        }
    }

    /// Remove handles for sounds that have stopped playing.
    fn update(&mut self) {
        self.active.retain(|h| h.state() != PlaybackState::Stopped);
    }
}
