// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use std::path::PathBuf;

use pagemill_core::AppConfig;
use pagemill_core::notice::Notice;

use crate::services::app_services::{AppServices, Preview};

/// Shared state accessible to all pages via `use_context`.
///
/// The selection lives here only until the user presses Convert; the
/// conversion itself gets its own copy.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Files picked by the user, in the order the picker returned them.
    pub selected: Vec<PathBuf>,
    /// Folder the PDF is written into.
    pub output_dir: Option<PathBuf>,
    /// File name typed by the user (the `.pdf` suffix is optional).
    pub output_name: String,
    /// Thumbnail of the first selected file.
    pub preview: Preview,
    /// Outcome of the last conversion attempt.
    pub last_notice: Option<Notice>,
    /// Application settings.
    pub config: AppConfig,
}

impl AppState {
    /// Create initial state, prefilled from saved settings.
    pub fn new(svc: &AppServices) -> Self {
        let config = svc.config();
        Self {
            selected: Vec::new(),
            output_dir: config.last_output_dir.clone(),
            output_name: config.default_output_name.clone(),
            preview: Preview::Empty,
            last_notice: None,
            config,
        }
    }

    /// Pick up the output folder a successful conversion saved. Other
    /// settings keep any edits not yet saved from the Settings page.
    pub fn sync_output_dir(&mut self, saved: &AppConfig) {
        self.config.last_output_dir = saved.last_output_dir.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_keeps_unsaved_settings() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        let mut state = AppState::new(&svc);
        state.config.preview_size = 96;
        state.config.default_output_name = "draft".into();

        let input = dir.path().join("a.txt");
        std::fs::write(&input, "text").unwrap();
        svc.convert(&[input], Some(dir.path()), "a").unwrap();
        state.sync_output_dir(&svc.config());

        assert_eq!(state.config.last_output_dir.as_deref(), Some(dir.path()));
        assert_eq!(state.config.preview_size, 96);
        assert_eq!(state.config.default_output_name, "draft");
    }
}
