// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted user preferences.

use crate::io::serialization;
use crate::models::preview::{clamp_fps, DEFAULT_PREVIEW_FPS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Preferences kept across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Animation preview rate (1-60)
    pub preview_fps: u32,
    /// Pause after each range-capture seek, in milliseconds
    pub settle_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_fps: DEFAULT_PREVIEW_FPS,
            settle_ms: 50,
        }
    }
}

impl Settings {
    /// Default settings file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spritecap").join("settings.json"))
    }

    /// Load settings, falling back to defaults if missing or malformed.
    pub fn load(path: &Path) -> Self {
        match serialization::import_json(path) {
            Ok(mut settings) => {
                settings.preview_fps = clamp_fps(settings.preview_fps);
                settings
            }
            Err(e) => {
                log::debug!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged.
    pub fn save(&self, path: &Path) {
        if let Err(e) = serialization::export_json(self, path) {
            log::warn!("Failed to save settings to {}: {}", path.display(), e);
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("spritecap-config-{}-{}", tag, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/spritecap.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.preview_fps, 12);
        assert_eq!(settings.settle(), Duration::from_millis(50));
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("roundtrip");
        let settings = Settings {
            preview_fps: 24,
            ..Default::default()
        };
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_and_out_of_range_values() {
        let path = scratch("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"preview_fps": 500}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.preview_fps, 60);
        assert_eq!(settings.settle_ms, 50);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
