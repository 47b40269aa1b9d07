// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Pagemill.

use std::path::{Path, PathBuf};

use crate::error::{PagemillError, Result};

/// File name suffixes handled by the image pipeline.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// File name suffixes handled by the text pipeline.
pub const TEXT_EXTENSIONS: &[&str] = &[".txt"];

/// The two kinds of input a conversion can accept. A request never mixes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// JPEG or PNG raster images, one per page.
    Image,
    /// UTF-8 plain-text files, one per page.
    Text,
}

impl InputKind {
    /// Classify a single path by its suffix (case-insensitive).
    pub fn of_path(path: &Path) -> Option<Self> {
        let name = path.to_string_lossy().to_ascii_lowercase();
        if IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            Some(Self::Image)
        } else if TEXT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            Some(Self::Text)
        } else {
            None
        }
    }

    /// Resolve the single kind shared by every path in `paths`.
    ///
    /// Fails with [`PagemillError::NoFilesSelected`] on an empty list and
    /// [`PagemillError::MixedOrUnsupportedInputKind`] when the paths do not
    /// all belong to the same supported kind.
    pub fn resolve<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let first = paths.first().ok_or(PagemillError::NoFilesSelected)?;
        let kind = Self::of_path(first.as_ref()).ok_or(PagemillError::MixedOrUnsupportedInputKind)?;

        if paths
            .iter()
            .all(|p| Self::of_path(p.as_ref()) == Some(kind))
        {
            Ok(kind)
        } else {
            Err(PagemillError::MixedOrUnsupportedInputKind)
        }
    }

    /// Human-readable label used in logs and notices.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageSize {
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: Self = Self {
        width_pt: 612.0,
        height_pt: 792.0,
    };

    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        (pt_to_mm(self.width_pt), pt_to_mm(self.height_pt))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Convert PDF points to millimetres.
pub fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// One conversion job: an ordered, homogeneous list of inputs and the file
/// they are merged into.
///
/// Built once per conversion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    kind: InputKind,
}

impl ConversionRequest {
    /// Validate and build a request.
    ///
    /// The input kind is resolved here, so a request that exists is always
    /// non-empty and homogeneous.
    pub fn new<I, P>(inputs: I, output: impl Into<PathBuf>) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let inputs: Vec<PathBuf> = inputs.into_iter().map(Into::into).collect();
        let kind = InputKind::resolve(&inputs)?;

        let output = output.into();
        if output.as_os_str().is_empty() {
            return Err(PagemillError::MissingOutputNameOrFolder);
        }

        Ok(Self {
            inputs,
            output,
            kind,
        })
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }
}

/// Where the merged PDF is written: a folder plus a user-typed file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub directory: PathBuf,
    pub file_name: String,
}

impl OutputTarget {
    /// Build a target, rejecting an empty folder or name.
    ///
    /// A missing `.pdf` suffix is appended once; the check ignores case so
    /// `REPORT.PDF` is left alone.
    pub fn new(directory: impl Into<PathBuf>, file_name: &str) -> Result<Self> {
        let directory = directory.into();
        let name = file_name.trim();
        if directory.as_os_str().is_empty() || name.is_empty() {
            return Err(PagemillError::MissingOutputNameOrFolder);
        }

        let file_name = if name.to_ascii_lowercase().ends_with(".pdf") {
            name.to_string()
        } else {
            format!("{name}.pdf")
        };

        Ok(Self {
            directory,
            file_name,
        })
    }

    /// Full path of the output file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Path the PDF was written to.
    pub output: PathBuf,
    /// Pipeline that produced it.
    pub kind: InputKind,
    /// Pages written (always one per input).
    pub page_count: usize,
}

/// Short echo of a selection: base names joined with `"; "`.
pub fn selection_summary<P: AsRef<Path>>(paths: &[P]) -> String {
    paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_extensions_case_insensitively() {
        assert_eq!(InputKind::of_path(Path::new("a.PNG")), Some(InputKind::Image));
        assert_eq!(InputKind::of_path(Path::new("b.JpEg")), Some(InputKind::Image));
        assert_eq!(InputKind::of_path(Path::new("c.jpg")), Some(InputKind::Image));
        assert_eq!(InputKind::of_path(Path::new("notes.TXT")), Some(InputKind::Text));
        assert_eq!(InputKind::of_path(Path::new("scan.tiff")), None);
        assert_eq!(InputKind::of_path(Path::new("png")), None);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(matches!(
            InputKind::resolve(&paths),
            Err(PagemillError::NoFilesSelected)
        ));
    }

    #[test]
    fn mixed_selection_is_rejected() {
        let err = ConversionRequest::new(["a.png", "b.txt"], "/tmp/out.pdf").unwrap_err();
        assert!(matches!(err, PagemillError::MixedOrUnsupportedInputKind));
        assert!(err.is_validation());
    }

    #[test]
    fn unsupported_selection_is_rejected() {
        let err = ConversionRequest::new(["a.gif"], "/tmp/out.pdf").unwrap_err();
        assert!(matches!(err, PagemillError::MixedOrUnsupportedInputKind));
    }

    #[test]
    fn homogeneous_request_keeps_order() {
        let req = ConversionRequest::new(["b.png", "a.JPG", "c.jpeg"], "/tmp/out.pdf").unwrap();
        assert_eq!(req.kind(), InputKind::Image);
        let names: Vec<_> = req.inputs().iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(names, ["b.png", "a.JPG", "c.jpeg"]);
        assert_eq!(req.output(), Path::new("/tmp/out.pdf"));
    }

    #[test]
    fn empty_output_path_is_rejected() {
        let err = ConversionRequest::new(["a.txt"], "").unwrap_err();
        assert!(matches!(err, PagemillError::MissingOutputNameOrFolder));
    }

    #[test]
    fn pdf_suffix_appended_once() {
        let target = OutputTarget::new("/out", "report").unwrap();
        assert_eq!(target.path(), PathBuf::from("/out/report.pdf"));

        let target = OutputTarget::new("/out", "report.pdf").unwrap();
        assert_eq!(target.file_name, "report.pdf");

        let target = OutputTarget::new("/out", "REPORT.PDF").unwrap();
        assert_eq!(target.file_name, "REPORT.PDF");
    }

    #[test]
    fn missing_name_or_folder() {
        assert!(matches!(
            OutputTarget::new("", "report"),
            Err(PagemillError::MissingOutputNameOrFolder)
        ));
        assert!(matches!(
            OutputTarget::new("/out", "   "),
            Err(PagemillError::MissingOutputNameOrFolder)
        ));
    }

    #[test]
    fn letter_page_in_millimetres() {
        let (w, h) = PageSize::LETTER.dimensions_mm();
        assert!((w - 215.9).abs() < 0.01);
        assert!((h - 279.4).abs() < 0.01);
    }

    #[test]
    fn summary_joins_base_names() {
        let summary = selection_summary(&["/home/u/a.png", "/tmp/b.png"]);
        assert_eq!(summary, "a.png; b.png");
    }
}
