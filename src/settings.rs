//! Game settings and preferences
//!
//! Persisted separately from the high score under its own storage key.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Key names as reported by `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub confirm: Vec<String>,
    /// Toggles the score overlay
    pub hud: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec!["ArrowLeft".into(), "a".into()],
            right: vec!["ArrowRight".into(), "d".into()],
            confirm: vec![" ".into(), "Spacebar".into()],
            hud: vec!["h".into()],
        }
    }
}

impl KeyBindings {
    fn matches(keys: &[String], key: &str) -> bool {
        keys.iter().any(|k| k.eq_ignore_ascii_case(key))
    }

    pub fn is_left(&self, key: &str) -> bool {
        Self::matches(&self.left, key)
    }

    pub fn is_right(&self, key: &str) -> bool {
        Self::matches(&self.right, key)
    }

    pub fn is_confirm(&self, key: &str) -> bool {
        Self::matches(&self.confirm, key)
    }

    pub fn is_hud(&self, key: &str) -> bool {
        Self::matches(&self.hud, key)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,
    /// Show score/level/best overlay
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            show_hud: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "doodleJumpSettings";

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings
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
