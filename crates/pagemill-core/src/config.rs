// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Name of the settings file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output folder prefilled in the converter form.
    pub last_output_dir: Option<PathBuf>,
    /// Output file name prefilled in the converter form.
    pub default_output_name: String,
    /// Bound (in pixels) for the preview thumbnail on both axes.
    pub preview_size: u32,
    /// Remember the output folder after each successful conversion.
    pub remember_output_dir: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_output_dir: None,
            default_output_name: "document".into(),
            preview_size: 200,
            remember_output_dir: true,
        }
    }
}

impl AppConfig {
    /// Load settings from `dir`, falling back to defaults when the file is
    /// absent or unreadable.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings file unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to `dir` as pretty-printed JSON.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            last_output_dir: Some(PathBuf::from("/home/user/pdfs")),
            default_output_name: "scans".into(),
            preview_size: 320,
            remember_output_dir: false,
        };
        config.save(dir.path()).unwrap();
        assert_eq!(AppConfig::load_or_default(dir.path()), config);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "preview_size": 128 }"#).unwrap();
        let config = AppConfig::load_or_default(dir.path());
        assert_eq!(config.preview_size, 128);
        assert_eq!(config.default_output_name, "document");
        assert!(config.remember_output_dir);
    }
}
