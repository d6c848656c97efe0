//! Audio preferences
//!
//! Persisted separately from player progress. The run core only reads the
//! music/sound flags; toggles come from the pause menu and main menu.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Volume applied when a channel is enabled (0-100)
pub const DEFAULT_VOLUME: u8 = 100;

/// Settings collaborator
pub trait SettingsStore {
    fn music_enabled(&self) -> bool;
    fn sound_enabled(&self) -> bool;
    fn set_music_enabled(&mut self, enabled: bool);
    fn set_sound_enabled(&mut self, enabled: bool);

    fn music_volume(&self) -> u8 {
        if self.music_enabled() { DEFAULT_VOLUME } else { 0 }
    }

    fn sound_volume(&self) -> u8 {
        if self.sound_enabled() { DEFAULT_VOLUME } else { 0 }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    /// Music volume (0 - 100)
    pub music_volume: u8,
    /// Sound effects volume (0 - 100)
    pub sound_volume: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            music_volume: DEFAULT_VOLUME,
            sound_volume: DEFAULT_VOLUME,
        }
    }
}

/// Settings held in memory only
impl SettingsStore for Settings {
    fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        self.music_volume = if enabled { DEFAULT_VOLUME } else { 0 };
    }

    fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        self.sound_volume = if enabled { DEFAULT_VOLUME } else { 0 };
    }

    fn music_volume(&self) -> u8 {
        self.music_volume
    }

    fn sound_volume(&self) -> u8 {
        self.sound_volume
    }
}

/// `SettingsStore` backed by a key-value store
pub struct SettingsRepository<S: KeyValueStore> {
    store: S,
    settings: Settings,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    /// Storage key
    const STORAGE_KEY: &'static str = "settings";

    pub fn open(store: S) -> Self {
        let settings = match load_json::<Settings>(&store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Settings::default()
            }
        };
        Self { store, settings }
    }

    #[cfg(test)]
    fn into_store(self) -> S {
        self.store
    }

    fn save(&mut self) {
        save_json(&mut self.store, Self::STORAGE_KEY, &self.settings);
    }
}

impl<S: KeyValueStore> SettingsStore for SettingsRepository<S> {
    fn music_enabled(&self) -> bool {
        self.settings.music_enabled
    }

    fn sound_enabled(&self) -> bool {
        self.settings.sound_enabled
    }

    fn set_music_enabled(&mut self, enabled: bool) {
        self.settings.set_music_enabled(enabled);
        self.save();
    }

    fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.set_sound_enabled(enabled);
        self.save();
    }

    fn music_volume(&self) -> u8 {
        self.settings.music_volume
    }

    fn sound_volume(&self) -> u8 {
        self.settings.sound_volume
    }
}
