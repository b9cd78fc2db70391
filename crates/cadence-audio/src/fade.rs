//! Tick-driven volume fades
//!
//! Fades never touch a port directly. Each step yields [`FadeCommand`]s that the engine applies
//! to the channel, which keeps the interpolation deterministic and testable without a clock.

use crate::config::Channel;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A linear volume ramp from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl LinearFade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Volume at elapsed = 0. A fade with no duration starts (and ends) at its target.
    pub fn start(&self) -> f32 {
        if self.duration > 0.0 {
            self.from
        } else {
            self.to
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        !(self.duration > 0.0) || self.elapsed >= self.duration
    }

    /// Fraction of the fade completed, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Advance by `dt` seconds and return the new volume. The last step lands exactly on the target.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.is_finished() {
            return self.to;
        }

        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            self.to
        } else {
            lerp(self.from, self.to, self.progress())
        }
    }
}

/// An instruction for the channel a fade runs on.
#[derive(Debug, Clone, PartialEq)]
pub enum FadeCommand {
    SetVolume(f32),
    /// Resolve the named music clip, assign it and start playback.
    StartClip(String),
}

#[derive(Debug, Clone)]
enum CrossfadePhase {
    FadeOut(LinearFade),
    FadeIn(LinearFade),
}

/// Fade out the current track, swap clips, fade the new one in.
#[derive(Debug, Clone)]
pub struct Crossfade {
    clip: String,
    half: f32,
    phase: CrossfadePhase,
}

impl Crossfade {
    /// Start a crossfade to `clip` lasting `total` seconds.
    ///
    /// If music is playing it fades from `current` to silence over the first half; otherwise
    /// the clip starts right away and only the fade-in half runs, towards `target`.
    pub fn begin(
        clip: impl Into<String>,
        total: f32,
        playing: bool,
        current: f32,
        target: f32,
    ) -> (Self, Vec<FadeCommand>) {
        let half = total / 2.0;
        let mut crossfade = Self {
            clip: clip.into(),
            half,
            phase: CrossfadePhase::FadeOut(LinearFade::new(current, 0.0, half)),
        };

        let mut commands = Vec::new();
        if playing {
            if let CrossfadePhase::FadeOut(fade) = &crossfade.phase {
                commands.push(FadeCommand::SetVolume(fade.start()));
            }
            if crossfade.fade_out_done() {
                crossfade.enter_fade_in(target, &mut commands);
            }
        } else {
            crossfade.enter_fade_in(target, &mut commands);
        }
        (crossfade, commands)
    }

    pub fn clip(&self) -> &str {
        &self.clip
    }

    pub fn is_fading_out(&self) -> bool {
        matches!(self.phase, CrossfadePhase::FadeOut(_))
    }

    fn fade_out_done(&self) -> bool {
        matches!(&self.phase, CrossfadePhase::FadeOut(fade) if fade.is_finished())
    }

    fn enter_fade_in(&mut self, target: f32, commands: &mut Vec<FadeCommand>) {
        let fade = LinearFade::new(0.0, target, self.half);
        commands.push(FadeCommand::SetVolume(fade.start()));
        commands.push(FadeCommand::StartClip(self.clip.clone()));
        self.phase = CrossfadePhase::FadeIn(fade);
    }

    fn advance(&mut self, dt: f32, target: f32, commands: &mut Vec<FadeCommand>) {
        match &mut self.phase {
            CrossfadePhase::FadeOut(fade) => {
                commands.push(FadeCommand::SetVolume(fade.advance(dt)));
                if fade.is_finished() {
                    self.enter_fade_in(target, commands);
                }
            }
            CrossfadePhase::FadeIn(fade) => {
                commands.push(FadeCommand::SetVolume(fade.advance(dt)));
            }
        }
    }

    fn is_finished(&self) -> bool {
        matches!(&self.phase, CrossfadePhase::FadeIn(fade) if fade.is_finished())
    }

    fn settle_volume(&self) -> f32 {
        match &self.phase {
            CrossfadePhase::FadeOut(fade) | CrossfadePhase::FadeIn(fade) => fade.target(),
        }
    }
}

/// An in-flight fade owning one channel's volume.
#[derive(Debug, Clone)]
pub enum FadeTask {
    Linear(LinearFade),
    Crossfade(Crossfade),
}

impl FadeTask {
    /// Advance by `dt`. `target` is the channel's current effective volume, used when a
    /// crossfade enters its fade-in half.
    pub fn advance(&mut self, dt: f32, target: f32) -> Vec<FadeCommand> {
        let mut commands = Vec::new();
        match self {
            Self::Linear(fade) => commands.push(FadeCommand::SetVolume(fade.advance(dt))),
            Self::Crossfade(crossfade) => crossfade.advance(dt, target, &mut commands),
        }
        commands
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Self::Linear(fade) => fade.is_finished(),
            Self::Crossfade(crossfade) => crossfade.is_finished(),
        }
    }

    /// Volume the channel is left at if this task is canceled: the target of its current ramp.
    pub fn settle_volume(&self) -> f32 {
        match self {
            Self::Linear(fade) => fade.target(),
            Self::Crossfade(crossfade) => crossfade.settle_volume(),
        }
    }

    /// Whether the channel should return to its effective volume once this task ends.
    pub fn restores_mix(&self) -> bool {
        matches!(self, Self::Crossfade(_))
    }
}

/// One fade slot per channel.
#[derive(Debug, Default)]
pub struct FadeSlots {
    slots: [Option<FadeTask>; 2],
}

impl FadeSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fading(&self, channel: Channel) -> bool {
        self.slots[channel.index()].is_some()
    }

    /// Install a task. Finished tasks are dropped instead of stored.
    pub fn insert(&mut self, channel: Channel, task: FadeTask) {
        self.slots[channel.index()] = (!task.is_finished()).then_some(task);
    }

    /// Remove the running task and return the volume its channel must settle at.
    pub fn cancel(&mut self, channel: Channel) -> Option<f32> {
        self.take(channel).map(|task| task.settle_volume())
    }

    pub fn take(&mut self, channel: Channel) -> Option<FadeTask> {
        self.slots[channel.index()].take()
    }
}
