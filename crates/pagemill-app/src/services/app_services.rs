// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: loads settings and gives the Dioxus UI one call per
// user action (preview, convert, save settings).
//
// Conversions run synchronously inside the click handler, which blocks the
// UI thread until the result dialog is closed, so there is never more than
// one in flight.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use pagemill_core::AppConfig;
use pagemill_core::error::{PagemillError, Result};
use pagemill_core::types::{ConversionReport, ConversionRequest, OutputTarget};
use pagemill_document::preview_data_uri;
use tracing::{info, warn};

use super::data_dir;

/// What the preview pane shows for the first selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Nothing selected yet.
    Empty,
    /// Thumbnail as a `data:` URI.
    Image(String),
    /// Not an image, or the image could not be read.
    Unavailable,
}

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// Cheaply cloneable so it can be moved into event handlers.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Resolve the data directory and load settings. Call once at app startup.
    pub fn init() -> Self {
        Self::with_data_dir(data_dir::data_dir())
    }

    /// Load settings from an explicit directory.
    pub fn with_data_dir(dir: PathBuf) -> Self {
        info!(path = %dir.display(), "initialising app services");
        let config = AppConfig::load_or_default(&dir);
        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        }
    }

    // -- Preview -------------------------------------------------------------

    /// Thumbnail for the first file of a selection, at most `size` pixels on
    /// each side.
    ///
    /// Preview failures are logged and shown as unavailable; they never block
    /// a conversion.
    pub fn preview(&self, selection: &[PathBuf], size: u32) -> Preview {
        let Some(first) = selection.first() else {
            return Preview::Empty;
        };
        match preview_data_uri(first, size) {
            Ok(Some(uri)) => Preview::Image(uri),
            Ok(None) => Preview::Unavailable,
            Err(e) => {
                warn!(path = %first.display(), error = %e, "preview failed");
                Preview::Unavailable
            }
        }
    }

    // -- Conversion ----------------------------------------------------------

    /// Validate the form and run one conversion.
    ///
    /// Checks run in the order the user sees them: files first, then the
    /// output name and folder, then the input kinds.
    pub fn convert(
        &self,
        selection: &[PathBuf],
        output_dir: Option<&Path>,
        output_name: &str,
    ) -> Result<ConversionReport> {
        if selection.is_empty() {
            return Err(PagemillError::NoFilesSelected);
        }
        let dir = output_dir.ok_or(PagemillError::MissingOutputNameOrFolder)?;
        let target = OutputTarget::new(dir, output_name)?;
        let request = ConversionRequest::new(selection.iter().cloned(), target.path())?;

        let report = pagemill_document::convert(&request)?;
        self.remember_output_dir(dir);
        Ok(report)
    }

    fn remember_output_dir(&self, dir: &Path) {
        let mut config = self.config();
        if !config.remember_output_dir || config.last_output_dir.as_deref() == Some(dir) {
            return;
        }
        config.last_output_dir = Some(dir.to_path_buf());
        if let Err(e) = self.save_config(&config) {
            warn!(error = %e, "failed to remember output folder");
        }
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        config.save(&self.data_dir)
    }
}
