// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion routine: merge a homogeneous list of images or text files into
// one PDF, one input per page, in input order.
//
// The whole document is assembled in memory and written to disk once, after
// every page has been produced, so a failure part-way through leaves no
// output file behind.

use std::path::{Path, PathBuf};

use pagemill_core::error::{PagemillError, Result};
use pagemill_core::types::{ConversionReport, ConversionRequest, InputKind, PageSize};
use tracing::{debug, error, info, instrument};

use crate::image::ImageProcessor;
use crate::layout::{PageLayout, TextBlock};
use crate::pdf::writer::PdfWriter;

/// Convert `request` and write the PDF to its output path.
///
/// The input kind was fixed when the request was built, so the pipeline is
/// chosen once here rather than per file.
#[instrument(skip_all, fields(kind = %request.kind(), inputs = request.inputs().len(), output = %request.output().display()))]
pub fn convert(request: &ConversionRequest) -> Result<ConversionReport> {
    let kind = request.kind();
    info!("Starting conversion");

    let result = render(request).and_then(|writer| {
        let page_count = writer.page_count();
        writer
            .write_to_file(request.output())
            .map_err(|err| pipeline_error(kind, err.to_string()))?;
        Ok(page_count)
    });

    match result {
        Ok(page_count) => {
            info!(page_count, "Conversion complete");
            Ok(ConversionReport {
                output: request.output().to_path_buf(),
                kind,
                page_count,
            })
        }
        Err(err) => {
            error!(error = %err, "Conversion failed");
            Err(err)
        }
    }
}

/// Validate `inputs` and `output` into a request, then convert it.
pub fn convert_paths<P: Into<PathBuf>>(
    inputs: impl IntoIterator<Item = P>,
    output: impl Into<PathBuf>,
) -> Result<ConversionReport> {
    let request = ConversionRequest::new(inputs, output)?;
    convert(&request)
}

/// Build every page for `request` without touching the output path.
fn render(request: &ConversionRequest) -> Result<PdfWriter> {
    let mut writer = PdfWriter::new(&document_title(request.output()), PageSize::LETTER);

    match request.kind() {
        InputKind::Image => {
            for path in request.inputs() {
                add_image(&mut writer, path)?;
            }
        }
        InputKind::Text => {
            for path in request.inputs() {
                add_text(&mut writer, path)?;
            }
        }
    }

    Ok(writer)
}

// -- Image pipeline -----------------------------------------------------------

fn add_image(writer: &mut PdfWriter, path: &Path) -> Result<()> {
    let image = ImageProcessor::open(path)?.into_rgb();
    if image.width() == 0 || image.height() == 0 {
        return Err(PagemillError::ImageProcessing(format!(
            "{} has no pixels",
            path.display()
        )));
    }

    let layout = PageLayout::fit(image.width(), image.height(), writer.page_size());
    debug!(
        path = %path.display(),
        pixel_width = layout.pixel_width,
        pixel_height = layout.pixel_height,
        aspect_ratio = layout.aspect_ratio,
        "Laying out image"
    );
    writer.add_image_page(&image, &layout);
    Ok(())
}

// -- Text pipeline ------------------------------------------------------------

fn add_text(writer: &mut PdfWriter, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        PagemillError::TextProcessing(format!("failed to read {}: {}", path.display(), err))
    })?;

    let block = TextBlock::from_text(&text);
    debug!(path = %path.display(), lines = block.lines.len(), "Laying out text");
    writer.add_text_page(&block);
    Ok(())
}

// -- Helpers ------------------------------------------------------------------

/// Wrap a failure in the error variant of the pipeline that hit it.
fn pipeline_error(kind: InputKind, message: String) -> PagemillError {
    match kind {
        InputKind::Image => PagemillError::ImageProcessing(message),
        InputKind::Text => PagemillError::TextProcessing(message),
    }
}

/// PDF title: the output file name without its extension.
fn document_title(output: &Path) -> String {
    output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Pagemill Document".into())
}
