use cadence_core::GameTime;
use tracing::{debug, info, warn};

use crate::config::{clamp_volume, AudioConfig, Channel, VolumeCategory};
use crate::error::AudioError;
use crate::fade::{Crossfade, FadeCommand, FadeSlots, FadeTask, LinearFade};
use crate::ports::{EffectPort, MusicPort};
use crate::registry::ClipRegistry;
use crate::volume::VolumeStore;

/// The audio coordinator. Owns the clip registry, the volume settings and both playback
/// channels, and runs fades when the host calls [`AudioEngine::update`] each frame.
pub struct AudioEngine<M, E>
where
    M: MusicPort,
    E: EffectPort<Clip = M::Clip>,
{
    music: M,
    effects: E,
    clips: ClipRegistry<M::Clip>,
    volumes: VolumeStore,
    fades: FadeSlots,
    /// Last volume pushed to each channel.
    output: [f32; 2],
    current_music: Option<String>,
}

impl<M, E> AudioEngine<M, E>
where
    M: MusicPort,
    E: EffectPort<Clip = M::Clip>,
{
    /// Create an engine and bring both channels to their effective volumes.
    pub fn new(music: M, effects: E, clips: ClipRegistry<M::Clip>, volumes: VolumeStore) -> Self {
        let mut engine = Self {
            music,
            effects,
            clips,
            volumes,
            fades: FadeSlots::new(),
            output: [0.0; 2],
            current_music: None,
        };
        for channel in Channel::ALL {
            engine.sync_channel(channel);
        }

        info!(
            music_clips = engine.clips.len(Channel::Music),
            sfx_clips = engine.clips.len(Channel::Sfx),
            "Audio engine initialized"
        );
        engine
    }

    // ---- Music ----

    /// Switch to a music clip immediately, at music * master volume.
    ///
    /// An unknown name leaves the current track (and any running fade) untouched.
    pub fn play_music(&mut self, name: &str) -> Result<(), AudioError> {
        let clip = self.clips.find(Channel::Music, name)?.clone();
        self.supersede(Channel::Music);

        self.music.set_clip(clip);
        let volume = self.volumes.effective(Channel::Music);
        self.set_output(Channel::Music, volume);
        self.music.play()?;

        debug!(clip = name, volume, "Playing music");
        self.current_music = Some(name.to_string());
        Ok(())
    }

    /// Crossfade to a music clip over `duration` seconds. Returns without waiting.
    ///
    /// When nothing is playing the clip starts right away, so a missing clip is reported here.
    /// Otherwise the clip is resolved once the fade-out finishes and a failure is returned by
    /// that [`AudioEngine::update`] call, leaving the channel silent.
    ///
    /// Replacing a running fade keeps the channel at its current level, which becomes the
    /// starting point of the new fade-out.
    pub fn play_music_faded(&mut self, name: &str, duration: f32) -> Result<(), AudioError> {
        if self.fades.take(Channel::Music).is_some() {
            debug!(clip = name, "Replacing running music fade");
        }

        let (crossfade, commands) = Crossfade::begin(
            name,
            duration,
            self.music.is_playing(),
            self.channel_volume(Channel::Music),
            self.volumes.effective(Channel::Music),
        );
        debug!(clip = name, duration, fading_out = crossfade.is_fading_out(), "Starting crossfade");

        let task = FadeTask::Crossfade(crossfade);
        self.apply(Channel::Music, commands)?;
        self.install(Channel::Music, task);
        Ok(())
    }

    /// Name of the music clip most recently started.
    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    // ---- Sound Effects ----

    /// Fire a one-shot effect at sfx * master volume. Overlapping effects are independent.
    pub fn play_effect(&mut self, name: &str) -> Result<(), AudioError> {
        let clip = self.clips.find(Channel::Sfx, name)?;
        let volume = self.volumes.effective(Channel::Sfx);
        self.effects.play_one_shot(clip, volume)?;
        debug!(clip = name, volume, "Playing effect");
        Ok(())
    }

    // ---- Fades ----

    /// Fade a channel from its current volume to `to`. Fading to 0.0 is how to silence a channel.
    pub fn fade(&mut self, channel: Channel, to: f32, duration: f32) {
        let from = self.channel_volume(channel);
        self.linear_fade(channel, from, to, duration);
    }

    /// Ramp a channel from `from` to `to` over `duration` seconds, replacing any running fade.
    /// Both ends are clamped into [0, 1].
    pub fn linear_fade(&mut self, channel: Channel, from: f32, to: f32, duration: f32) {
        self.supersede(channel);

        let fade = LinearFade::new(clamp_volume(from), clamp_volume(to), duration);
        self.set_output(channel, fade.start());
        self.install(channel, FadeTask::Linear(fade));
    }

    pub fn is_fading(&self, channel: Channel) -> bool {
        self.fades.is_fading(channel)
    }

    // ---- Volume ----

    /// Clamp and persist a category volume, then refresh any channel it scales that is not fading.
    pub fn set_volume(&mut self, category: VolumeCategory, value: f32) {
        let stored = self.volumes.set(category, value);
        debug!(?category, volume = stored, "Volume changed");

        match category.channel() {
            Some(channel) => self.sync_channel(channel),
            None => {
                for channel in Channel::ALL {
                    self.sync_channel(channel);
                }
            }
        }
    }

    pub fn volume(&self, category: VolumeCategory) -> f32 {
        self.volumes.get(category)
    }

    pub fn master_volume(&self) -> f32 {
        self.volume(VolumeCategory::Master)
    }

    pub fn set_master_volume(&mut self, value: f32) {
        self.set_volume(VolumeCategory::Master, value);
    }

    pub fn music_volume(&self) -> f32 {
        self.volume(VolumeCategory::Music)
    }

    pub fn set_music_volume(&mut self, value: f32) {
        self.set_volume(VolumeCategory::Music, value);
    }

    pub fn sfx_volume(&self) -> f32 {
        self.volume(VolumeCategory::Sfx)
    }

    pub fn set_sfx_volume(&mut self, value: f32) {
        self.set_volume(VolumeCategory::Sfx, value);
    }

    /// Volume currently applied to a channel's output.
    pub fn channel_volume(&self, channel: Channel) -> f32 {
        self.output[channel.index()]
    }

    // ---- Per-frame ----

    /// Advance running fades by `dt` seconds. Call once per frame.
    ///
    /// Returns the first error hit by a crossfade this tick; the failing fade is dropped.
    pub fn update(&mut self, dt: f32) -> Result<(), AudioError> {
        let mut result = Ok(());

        for channel in Channel::ALL {
            let Some(mut task) = self.fades.take(channel) else {
                continue;
            };

            let commands = task.advance(dt, self.volumes.effective(channel));
            if let Err(e) = self.apply(channel, commands) {
                if result.is_ok() {
                    result = Err(e);
                }
                continue;
            }
            self.install(channel, task);
        }

        self.music.update();
        self.effects.update();
        result
    }

    /// Advance with this frame's unscaled delta, so fades keep running while game time is paused.
    pub fn tick(&mut self, time: &GameTime) -> Result<(), AudioError> {
        self.update(time.unscaled_delta_time)
    }

    // ---- Access ----

    pub fn config(&self) -> AudioConfig {
        self.volumes.config()
    }

    pub fn volumes(&self) -> &VolumeStore {
        &self.volumes
    }

    pub fn clips(&self) -> &ClipRegistry<M::Clip> {
        &self.clips
    }

    pub fn music_port(&self) -> &M {
        &self.music
    }

    pub fn effect_port(&self) -> &E {
        &self.effects
    }

    // ---- Internals ----

    fn set_output(&mut self, channel: Channel, volume: f32) {
        self.output[channel.index()] = volume;
        match channel {
            Channel::Music => self.music.set_volume(volume),
            Channel::Sfx => self.effects.set_volume(volume),
        }
    }

    fn sync_channel(&mut self, channel: Channel) {
        if !self.fades.is_fading(channel) {
            let volume = self.volumes.effective(channel);
            self.set_output(channel, volume);
        }
    }

    /// Cancel the channel's running fade, settling the channel at that fade's target.
    fn supersede(&mut self, channel: Channel) {
        if let Some(settle) = self.fades.cancel(channel) {
            debug!(%channel, volume = settle, "Superseding running fade");
            self.set_output(channel, settle);
        }
    }

    fn install(&mut self, channel: Channel, task: FadeTask) {
        if !task.is_finished() {
            self.fades.insert(channel, task);
            return;
        }

        if task.restores_mix() {
            let volume = self.volumes.effective(channel);
            if volume != self.channel_volume(channel) {
                self.set_output(channel, volume);
            }
        }
        debug!(%channel, "Fade finished");
    }

    /// Apply fade commands in order. A failed clip start aborts the rest and silences the channel.
    fn apply(&mut self, channel: Channel, commands: Vec<FadeCommand>) -> Result<(), AudioError> {
        for command in commands {
            match command {
                FadeCommand::SetVolume(volume) => self.set_output(channel, volume),
                FadeCommand::StartClip(name) => {
                    if let Err(e) = self.start_clip(&name) {
                        warn!("Crossfade to '{}' aborted: {}", name, e);
                        self.set_output(channel, 0.0);
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }

    fn start_clip(&mut self, name: &str) -> Result<(), AudioError> {
        let clip = self.clips.find(Channel::Music, name)?.clone();
        self.music.set_clip(clip);
        self.music.play()?;
        self.current_music = Some(name.to_string());
        Ok(())
    }
}
