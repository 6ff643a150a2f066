// crates/vidshelf-core/src/config.rs
//
// User-tunable settings, stored as `settings.json` in the app data directory.
// Every field has a default so a partial or missing file still loads.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::gesture::{DEFAULT_DOUBLE_TAP_WINDOW_MS, DEFAULT_INDICATOR_MS};

pub const CONFIG_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Jump size for the ±seek buttons and double-taps.
    pub seek_step_ms:         u64,
    /// Two taps on the same half closer than this are a double-tap.
    pub double_tap_window_ms: u64,
    /// How long the double-tap acknowledgment stays on screen.
    pub seek_indicator_ms:    u64,
    /// Restart from 0 at end of file.
    pub looping:              bool,
    /// Decoded frames wider than this are scaled down.
    pub max_frame_width:      u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seek_step_ms:         10_000,
            double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS,
            seek_indicator_ms:    DEFAULT_INDICATOR_MS,
            looping:              true,
            max_frame_width:      1280,
        }
    }
}

impl AppConfig {
    /// Read `path`; a missing or malformed file yields the defaults.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("[config] read {} failed: {e}: using defaults", path.display());
                return Self::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            log::warn!("[config] {} is malformed: {e}: using defaults", path.display());
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
