// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing notices. Every conversion outcome, good or bad, is mapped to one
// blocking message with a severity that drives its presentation.

use crate::error::PagemillError;
use crate::types::ConversionReport;

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The conversion succeeded.
    Info,
    /// The user left something out; nothing was attempted.
    Warning,
    /// The conversion was refused or failed.
    Error,
}

/// A plain-language message shown to the user in a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    pub severity: Severity,
}

/// Notice for a successful conversion, naming the output file.
pub fn notice_for_report(report: &ConversionReport) -> Notice {
    Notice {
        title: "Success".into(),
        message: format!(
            "PDF created successfully ({} page{}) at:\n{}",
            report.page_count,
            if report.page_count == 1 { "" } else { "s" },
            report.output.display()
        ),
        severity: Severity::Info,
    }
}

/// Notice for a failed or refused conversion.
pub fn notice_for_error(err: &PagemillError) -> Notice {
    match err {
        PagemillError::NoFilesSelected => Notice {
            title: "Warning".into(),
            message: "Select at least one file.".into(),
            severity: Severity::Warning,
        },

        PagemillError::MissingOutputNameOrFolder => Notice {
            title: "Warning".into(),
            message: "Enter a name for the PDF and choose an output folder.".into(),
            severity: Severity::Warning,
        },

        PagemillError::MixedOrUnsupportedInputKind => Notice {
            title: "Error".into(),
            message: "Select files of the same type: only images or only text files.".into(),
            severity: Severity::Error,
        },

        other => Notice {
            title: "Error".into(),
            message: format!("An error occurred: {other}"),
            severity: Severity::Error,
        },
    }
}
