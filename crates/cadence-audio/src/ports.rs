//! Output channels the engine drives. The kira implementations live in `music` and `sfx`.

use crate::error::AudioError;

/// The music output: one assigned clip, played and faded in place.
pub trait MusicPort {
    type Clip: Clone;

    /// Assign the clip that the next [`MusicPort::play`] starts. Does not start playback.
    fn set_clip(&mut self, clip: Self::Clip);

    /// Start the assigned clip from the beginning, replacing whatever was playing.
    fn play(&mut self) -> Result<(), AudioError>;

    fn is_playing(&self) -> bool;

    /// Set the instantaneous output gain. Callable mid-playback.
    fn set_volume(&mut self, volume: f32);

    /// Per-tick housekeeping.
    fn update(&mut self) {}
}

/// The effects output: independent fire-and-forget one-shots.
pub trait EffectPort {
    type Clip: Clone;

    fn play_one_shot(&mut self, clip: &Self::Clip, volume: f32) -> Result<(), AudioError>;

    /// Set the channel gain, applied to one-shots that are still sounding.
    fn set_volume(&mut self, volume: f32);

    /// Per-tick housekeeping.
    fn update(&mut self) {}
}
