use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kira::manager::backend::DefaultBackend;
use kira::manager::{AudioManager, AudioManagerSettings};
use kira::sound::static_sound::StaticSoundData;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::AudioError;
use crate::manifest::ClipManifest;
use crate::music::KiraMusicPort;
use crate::registry::ClipRegistry;
use crate::sfx::KiraEffectPort;

/// kira manager shared by the music and effect ports.
pub(crate) type SharedManager = Arc<Mutex<AudioManager<DefaultBackend>>>;

/// Opens the default audio device and hands out ports that play through it.
pub struct KiraBackend {
    manager: SharedManager,
}

impl KiraBackend {
    pub fn new() -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::InitFailed(e.to_string()))?;

        info!("Audio backend initialized");
        Ok(Self {
            manager: Arc::new(Mutex::new(manager)),
        })
    }

    /// Music and effect ports sharing this backend's device.
    pub fn ports(&self) -> (KiraMusicPort, KiraEffectPort) {
        (
            KiraMusicPort::new(Arc::clone(&self.manager)),
            KiraEffectPort::new(Arc::clone(&self.manager)),
        )
    }
}

/// Decodes clip files, reusing already decoded data for repeated paths.
#[derive(Default)]
pub struct ClipLoader {
    cache: HashMap<PathBuf, StaticSoundData>,
}

impl ClipLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<StaticSoundData, AudioError> {
        if let Some(data) = self.cache.get(path) {
            return Ok(data.clone());
        }
        let data = StaticSoundData::from_file(path)
            .map_err(|e| AudioError::LoadFailed(path.to_path_buf(), e.to_string()))?;
        debug!("Decoded clip {:?}", path);
        self.cache.insert(path.to_path_buf(), data.clone());
        Ok(data)
    }

    /// Decode every clip in a manifest into a registry.
    pub fn load_manifest(
        &mut self,
        manifest: ClipManifest,
    ) -> Result<ClipRegistry<StaticSoundData>, AudioError> {
        manifest.into_registry(|path| self.load(path))
    }
}
