//! Time system for Cadence
//!
//! Hosts call [`GameTime::update`] (or [`GameTime::advance`]) once per frame and hand the
//! resulting delta to the audio engine's tick.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Something that can report how much real time passed since it was last asked.
pub trait TimeSource {
    /// Seconds elapsed since the previous call (or since creation, for the first call).
    fn delta_seconds(&mut self) -> f32;
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn delta_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }
}

/// Deterministic time source that reports a fixed step every frame.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    /// Seconds reported per call
    pub step: f32,
}

impl ManualClock {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl TimeSource for ManualClock {
    fn delta_seconds(&mut self) -> f32 {
        self.step
    }
}

/// Configuration for frame time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Maximum delta time, so a long stall does not skip a whole fade in one frame
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Scaled time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled, zero while paused)
    pub delta_time: f32,
    /// Clamped delta time, ignoring pause and time scale
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether game time is paused
    pub paused: bool,
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.max(0.0).min(self.config.max_delta_time);
        self.frame_count += 1;

        if self.paused {
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
    }

    /// Pull this frame's delta from a time source and update
    pub fn advance(&mut self, source: &mut impl TimeSource) {
        let delta = source.delta_seconds();
        self.update(delta);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.pause();
        time.update(0.016);
        assert_eq!(time.delta_time, 0.0);
        assert!((time.unscaled_delta_time - 0.016).abs() < f32::EPSILON);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(5.0);
        assert_eq!(time.unscaled_delta_time, 0.25);

        time.update(-1.0);
        assert_eq!(time.unscaled_delta_time, 0.0);
    }

    #[test]
    fn test_manual_clock() {
        let mut time = GameTime::default();
        let mut clock = ManualClock::new(0.1);
        time.set_time_scale(2.0);
        time.advance(&mut clock);
        time.advance(&mut clock);

        assert_eq!(time.frame_count, 2);
        assert!((time.delta_time - 0.2).abs() < f32::EPSILON);
        assert!((time.total_time - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_system_clock_is_non_negative() {
        let mut clock = SystemClock::new();
        assert!(clock.delta_seconds() >= 0.0);
    }
}
