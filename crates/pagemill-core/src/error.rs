// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagemill.

use thiserror::Error;

/// Top-level error type for all Pagemill operations.
#[derive(Debug, Error)]
pub enum PagemillError {
    // -- Request validation --
    #[error("no files selected")]
    NoFilesSelected,

    #[error("output file name or output folder is missing")]
    MissingOutputNameOrFolder,

    #[error("inputs must all be images (.jpg, .jpeg, .png) or all be text files (.txt)")]
    MixedOrUnsupportedInputKind,

    // -- Pipeline errors --
    #[error("image processing failed: {0}")]
    ImageProcessing(String),

    #[error("text processing failed: {0}")]
    TextProcessing(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PagemillError {
    /// Whether the error was raised while validating a request, before any
    /// page was produced or any file touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoFilesSelected
                | Self::MissingOutputNameOrFolder
                | Self::MixedOrUnsupportedInputKind
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagemillError>;
