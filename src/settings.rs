//! Game settings
//!
//! Persisted in LocalStorage on the web; on native the path in
//! `BRICK_BREAKER_SETTINGS` may point at a JSON file.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunables read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives granted by a new game
    pub start_lives: u32,
    /// Paddle movement per tick while a direction key is held
    pub paddle_speed: f32,
    /// Pause between clearing a level and starting the next one
    pub level_complete_delay_ms: f64,

    // === Canvas ===
    pub max_width: u32,
    pub max_height: u32,
    /// Space kept free around the canvas inside the window
    pub window_margin: u32,

    // === Audio ===
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            paddle_speed: PADDLE_KEY_SPEED,
            level_complete_delay_ms: LEVEL_COMPLETE_DELAY_MS,
            max_width: MAX_CANVAS_WIDTH,
            max_height: MAX_CANVAS_HEIGHT,
            window_margin: CANVAS_MARGIN,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_PATH: &'static str = "BRICK_BREAKER_SETTINGS";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Clamp values that would make the game unplayable
    pub fn sanitized(mut self) -> Self {
        self.start_lives = self.start_lives.max(1);
        if !self.paddle_speed.is_finite() || self.paddle_speed < 0.0 {
            self.paddle_speed = PADDLE_KEY_SPEED;
        }
        if !self.level_complete_delay_ms.is_finite() || self.level_complete_delay_ms < 0.0 {
            self.level_complete_delay_ms = LEVEL_COMPLETE_DELAY_MS;
        }
        self.max_width = self.max_width.max(1);
        self.max_height = self.max_height.max(1);
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Settings saved");
        }
    }

    /// Load settings from the file named by `BRICK_BREAKER_SETTINGS`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
