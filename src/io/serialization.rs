// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings serialization and deserialization.
//!
//! This module handles reading and writing the persisted preferences as
//! JSON.

use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::Path;

/// Export settings to JSON format, creating parent directories as needed.
pub fn export_json(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import settings from JSON format.
pub fn import_json(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&json)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let dir = std::env::temp_dir().join(format!("spritecap-settings-{}", std::process::id()));
        let path = dir.join("nested/settings.json");
        let settings = Settings {
            preview_fps: 30,
            settle_ms: 10,
        };

        export_json(&settings, &path).unwrap();
        assert_eq!(import_json(&path).unwrap(), settings);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_import_missing_file_fails() {
        assert!(import_json(Path::new("/nonexistent/spritecap/settings.json")).is_err());
    }
}
