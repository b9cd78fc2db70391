//! Cadence demo - plays a clip manifest through the audio engine
//!
//! Cycles through every music track with crossfades and fires each sound effect along the way.
//! Pass a manifest path as the first argument to override the one in the settings file.

mod settings;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cadence_audio::{
    AudioEngine, Channel, ClipLoader, ClipManifest, KiraBackend, MemoryPreferences, Preferences,
    TomlPreferences, VolumeStore,
};
use cadence_core::{GameTime, SystemClock};

use crate::settings::DemoSettings;

fn preferences(settings: &DemoSettings) -> Box<dyn Preferences> {
    if let Some(path) = &settings.preferences {
        return Box::new(TomlPreferences::open(path));
    }
    match TomlPreferences::in_config_dir("cadence") {
        Some(prefs) => Box::new(prefs),
        None => {
            warn!("Volume settings will not be saved this session");
            Box::new(MemoryPreferences::new())
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let mut settings = DemoSettings::load();
    if let Some(path) = std::env::args().nth(1) {
        settings.manifest = PathBuf::from(path);
    }

    let manifest = ClipManifest::load(&settings.manifest)
        .with_context(|| format!("Failed to load manifest {:?}", settings.manifest))?;
    let clips = ClipLoader::new()
        .load_manifest(manifest)
        .context("Failed to decode clips")?;

    let tracks: Vec<String> = clips.names(Channel::Music).map(String::from).collect();
    let effects: Vec<String> = clips.names(Channel::Sfx).map(String::from).collect();
    if tracks.is_empty() {
        anyhow::bail!("Manifest {:?} has no music clips", settings.manifest);
    }

    let backend = KiraBackend::new().context("Failed to open audio device")?;
    let (music, sfx) = backend.ports();
    let volumes = VolumeStore::load(preferences(&settings));
    let mut engine = AudioEngine::new(music, sfx, clips, volumes);
    info!(config = ?engine.config(), "Starting Cadence demo");

    engine.play_music(&tracks[0])?;

    let frame = Duration::from_secs_f32(settings.frame_seconds());
    let mut clock = SystemClock::new();
    let mut time = GameTime::default();

    for (i, track) in tracks.iter().enumerate().skip(1).chain([(0, &tracks[0])]) {
        let started = time.total_time;
        while time.total_time - started < settings.track_seconds as f64 {
            thread::sleep(frame);
            time.advance(&mut clock);
            engine.tick(&time)?;
        }

        if let Some(effect) = effects.get(i % effects.len().max(1)) {
            engine.play_effect(effect)?;
        }
        info!("Crossfading to '{}'", track);
        engine.play_music_faded(track, settings.crossfade_seconds)?;
    }

    while engine.is_fading(Channel::Music) {
        thread::sleep(frame);
        time.advance(&mut clock);
        engine.tick(&time)?;
    }

    info!("Fading out");
    engine.fade(Channel::Music, 0.0, settings.crossfade_seconds);
    while engine.is_fading(Channel::Music) {
        thread::sleep(frame);
        time.advance(&mut clock);
        engine.tick(&time)?;
    }

    Ok(())
}
