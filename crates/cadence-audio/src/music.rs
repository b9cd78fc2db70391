use std::time::Duration;

use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::sound::PlaybackState;
use kira::tween::Tween;

use crate::backend::SharedManager;
use crate::error::AudioError;
use crate::ports::MusicPort;

/// Short ramp applied to volume changes so per-frame fade steps don't click.
const VOLUME_TWEEN: Duration = Duration::from_millis(10);

/// Looping background music on a kira manager.
pub struct KiraMusicPort {
    manager: SharedManager,
    clip: Option<StaticSoundData>,
    current: Option<StaticSoundHandle>,
    volume: f32,
}

impl KiraMusicPort {
    pub(crate) fn new(manager: SharedManager) -> Self {
        Self {
            manager,
            clip: None,
            current: None,
            volume: 1.0,
        }
    }

    fn tween() -> Tween {
        Tween {
            duration: VOLUME_TWEEN,
            ..Default::default()
        }
    }
}

impl MusicPort for KiraMusicPort {
    type Clip = StaticSoundData;

    fn set_clip(&mut self, clip: StaticSoundData) {
        self.clip = Some(clip);
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let Some(data) = self.clip.clone() else {
            return Err(AudioError::PlaybackFailed("no music clip assigned".into()));
        };

        if let Some(mut previous) = self.current.take() {
            previous.stop(Self::tween());
        }

        let settings = StaticSoundSettings::new()
            .volume(self.volume as f64)
            .loop_region(..);
        let handle = self
            .manager
            .lock()
            .play(data.with_settings(settings))
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;

        self.current = Some(handle);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|handle| handle.state() == PlaybackState::Playing)
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(ref mut handle) = self.current {
            handle.set_volume(volume as f64, Self::tween());
        }
    }

    fn update(&mut self) {
        if self
            .current
            .as_ref()
            .is_some_and(|handle| handle.state() == PlaybackState::Stopped)
        {
            self.current = None;
        }
    }
}
