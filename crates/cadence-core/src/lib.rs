//! Cadence Core - Frame time for the Cadence audio coordinator
//!
//! This crate provides the timing primitives hosts use to drive the audio engine:
//! - Per-frame delta tracking with clamping, scaling and pause
//! - Injectable time sources so fades can be tested without a real clock

pub mod time;

pub use time::{GameTime, ManualClock, SystemClock, TimeConfig, TimeSource};
