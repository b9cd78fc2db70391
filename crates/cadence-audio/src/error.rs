use std::path::PathBuf;

use crate::config::Channel;

/// Errors that can occur in the audio system.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no {channel} clip named '{name}'")]
    ClipNotFound { channel: Channel, name: String },

    #[error("failed to initialize audio backend: {0}")]
    InitFailed(String),

    #[error("failed to load audio file '{0}': {1}")]
    LoadFailed(PathBuf, String),

    #[error("audio playback failed: {0}")]
    PlaybackFailed(String),

    #[error("invalid clip manifest '{0}': {1}")]
    Manifest(PathBuf, String),

    #[error("failed to encode preferences '{0}': {1}")]
    Preferences(PathBuf, String),

    #[error("I/O error writing '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

impl AudioError {
    pub(crate) fn clip_not_found(channel: Channel, name: &str) -> Self {
        Self::ClipNotFound {
            channel,
            name: name.to_string(),
        }
    }
}
