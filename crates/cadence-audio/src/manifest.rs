//! Clip manifests: the static, ordered list of named clips for each channel.
//!
//! ```toml
//! [[music]]
//! name = "title"
//! path = "music/title.ogg"
//!
//! [[sfx]]
//! name = "click"
//! path = "sfx/click.wav"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::config::Channel;
use crate::error::AudioError;
use crate::registry::ClipRegistry;

/// One named clip file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClipEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClipManifest {
    #[serde(default)]
    pub music: Vec<ClipEntry>,
    #[serde(default)]
    pub sfx: Vec<ClipEntry>,
}

impl ClipManifest {
    /// Parse a manifest. `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, AudioError> {
        toml::from_str(content).map_err(|e| AudioError::Manifest(origin.to_path_buf(), e.to_string()))
    }

    /// Read a manifest file. Relative clip paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AudioError::Manifest(path.to_path_buf(), e.to_string()))?;
        let mut manifest = Self::from_toml_str(&content, path)?;

        if let Some(base) = path.parent() {
            manifest.rebase(base);
        }
        info!(
            music = manifest.music.len(),
            sfx = manifest.sfx.len(),
            "Loaded clip manifest from {:?}",
            path
        );
        Ok(manifest)
    }

    /// Prefix every relative clip path with `base`.
    pub fn rebase(&mut self, base: &Path) {
        for entry in self.music.iter_mut().chain(self.sfx.iter_mut()) {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }
    }

    /// Build a registry, loading each clip with `load` in manifest order.
    pub fn into_registry<C>(
        self,
        mut load: impl FnMut(&Path) -> Result<C, AudioError>,
    ) -> Result<ClipRegistry<C>, AudioError> {
        let mut registry = ClipRegistry::new();
        for (channel, entries) in [(Channel::Music, self.music), (Channel::Sfx, self.sfx)] {
            for entry in entries {
                let clip = load(&entry.path)?;
                registry.register(channel, entry.name, clip);
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        [[music]]
        name = "title"
        path = "music/title.ogg"

        [[music]]
        name = "battle"
        path = "/abs/battle.ogg"

        [[sfx]]
        name = "click"
        path = "sfx/click.wav"
    "#;

    #[test]
    fn parses_entries_in_order() {
        let manifest = ClipManifest::from_toml_str(MANIFEST, Path::new("clips.toml")).unwrap();
        let names: Vec<_> = manifest.music.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["title", "battle"]);
        assert_eq!(manifest.sfx[0].path, PathBuf::from("sfx/click.wav"));
    }

    #[test]
    fn missing_sections_are_empty() {
        let manifest = ClipManifest::from_toml_str("", Path::new("clips.toml")).unwrap();
        assert_eq!(manifest, ClipManifest::default());
    }

    #[test]
    fn invalid_manifest_names_the_file() {
        let err = ClipManifest::from_toml_str("[[music]]\nname = 3", Path::new("bad.toml")).unwrap_err();
        match err {
            AudioError::Manifest(path, _) => assert_eq!(path, PathBuf::from("bad.toml")),
            other => panic!("expected Manifest error, got {:?}", other),
        }
    }

    #[test]
    fn rebase_only_touches_relative_paths() {
        let mut manifest = ClipManifest::from_toml_str(MANIFEST, Path::new("clips.toml")).unwrap();
        manifest.rebase(Path::new("/game/audio"));
        assert_eq!(manifest.music[0].path, PathBuf::from("/game/audio/music/title.ogg"));
        assert_eq!(manifest.music[1].path, PathBuf::from("/abs/battle.ogg"));
        assert_eq!(manifest.sfx[0].path, PathBuf::from("/game/audio/sfx/click.wav"));
    }

    #[test]
    fn builds_registry_with_loader() {
        let manifest = ClipManifest::from_toml_str(MANIFEST, Path::new("clips.toml")).unwrap();
        let clips = manifest
            .into_registry(|path| Ok(path.to_string_lossy().into_owned()))
            .unwrap();

        assert_eq!(clips.find(Channel::Music, "battle").unwrap(), "/abs/battle.ogg");
        assert_eq!(clips.find(Channel::Sfx, "click").unwrap(), "sfx/click.wav");
        assert!(clips.find(Channel::Sfx, "title").is_err());
    }

    #[test]
    fn loader_errors_propagate() {
        let manifest = ClipManifest::from_toml_str(MANIFEST, Path::new("clips.toml")).unwrap();
        let result = manifest.into_registry::<()>(|path| {
            Err(AudioError::LoadFailed(path.to_path_buf(), "corrupt".into()))
        });
        assert!(matches!(result, Err(AudioError::LoadFailed(..))));
    }
}
