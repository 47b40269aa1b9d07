// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagemill-document: Merge images or text files into one PDF.
//
// Provides the conversion routine (one page per input, images fitted and
// centred, text set in a fixed monospace block), the page layout rules it
// follows, image loading and preview thumbnails, and a PDF reader for
// inspecting the result.

pub mod convert;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary items so callers can use `pagemill_document::convert` etc.
pub use convert::{convert, convert_paths};
pub use crate::image::processor::{ImageProcessor, preview_data_uri};
pub use layout::{PageLayout, TextBlock};
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
