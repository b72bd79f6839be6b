//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, PlatformProfile, ProfileKind};

/// Which platform profile to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProfileOverride {
    /// Detect from the device
    #[default]
    Auto,
    Force(ProfileKind),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play sound effects
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Gameplay ===
    /// Platform profile selection
    pub profile: ProfileOverride,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            volume: 0.7,
            show_fps: false,
            profile: ProfileOverride::Auto,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "emoji_dodge_settings";

    /// Effective volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Resolve the profile for a new session. `detect` is only called for Auto.
    pub fn resolve_profile(&self, detect: impl FnOnce() -> PlatformProfile) -> PlatformProfile {
        match self.profile {
            ProfileOverride::Auto => detect(),
            ProfileOverride::Force(kind) => PlatformProfile::from_kind(kind),
        }
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Ok(Some(json)) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Discarding unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}
