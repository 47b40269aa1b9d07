// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: assemble a document page by page from images or text blocks
// using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use pagemill_core::PageSize;
use pagemill_core::error::PagemillError;
use printpdf::{
    BuiltinFont, DictItem, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::ImageProcessor;
use crate::layout::{PageLayout, TEXT_FONT_SIZE, TextBlock};
use crate::pdf::encoding::encode_win_ansi;

/// Images are placed at 72 DPI so one pixel spans one point.
const NATIVE_DPI: f32 = 72.0;

/// Font of the text pipeline.
const TEXT_FONT: BuiltinFont = BuiltinFont::Courier;

/// Builds a multi-page PDF, one page per call to `add_*_page`.
///
/// Pages are kept in insertion order. The document is serialised once by
/// [`PdfWriter::finish`], which consumes the writer.
pub struct PdfWriter {
    /// Size of every page.
    page_size: PageSize,
    /// Document under construction; holds the image XObjects.
    document: PdfDocument,
    /// Finished pages, in order.
    pages: Vec<PdfPage>,
}

impl PdfWriter {
    /// Create a writer whose pages all have `page_size`.
    pub fn new(title: &str, page_size: PageSize) -> Self {
        Self {
            page_size,
            document: PdfDocument::new(title),
            pages: Vec::new(),
        }
    }

    /// Create a writer producing US Letter pages.
    pub fn letter(title: &str) -> Self {
        Self::new(title, PageSize::LETTER)
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.page_size.dimensions_mm();
        (Mm(w_mm), Mm(h_mm))
    }

    fn push_page(&mut self, ops: Vec<Op>) {
        let (page_w, page_h) = self.page_dimensions();
        self.pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // -- Image pages ----------------------------------------------------------

    /// Append a page showing `image` at the position and size in `layout`.
    #[instrument(skip_all, fields(page = self.pages.len() + 1))]
    pub fn add_image_page(&mut self, image: &ImageProcessor, layout: &PageLayout) {
        let rgb = image.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width,
            height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.document.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(layout.x_offset)),
                translate_y: Some(Pt(layout.y_offset)),
                scale_x: Some(layout.scale_x()),
                scale_y: Some(layout.scale_y()),
                dpi: Some(NATIVE_DPI),
                rotate: None,
            },
        }];
        self.push_page(ops);

        debug!(
            width = layout.width,
            height = layout.height,
            x = layout.x_offset,
            y = layout.y_offset,
            scaled = layout.is_scaled(),
            "Image placed on page"
        );
    }

    // -- Text pages -----------------------------------------------------------

    /// Append a page with every line of `block`, top to bottom from the fixed
    /// text origin. Lines that run past the bottom edge are not carried over.
    ///
    /// Lines are encoded to WinAnsi here and shown with a raw `Tj`, since
    /// printpdf passes builtin-font text through as UTF-8.
    #[instrument(skip_all, fields(page = self.pages.len() + 1, lines = block.lines.len()))]
    pub fn add_text_page(&mut self, block: &TextBlock) {
        let mut ops: Vec<Op> = Vec::new();
        let mut replaced = 0;

        for (index, line) in block.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let (x, y) = TextBlock::line_origin(index);
            let encoded = encode_win_ansi(line);
            replaced += encoded.replaced;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point { x: Pt(x), y: Pt(y) },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(TEXT_FONT_SIZE),
                font: TEXT_FONT,
            });
            // Puts the font in the resources; writes no operator.
            ops.push(Op::WriteTextBuiltinFont {
                items: Vec::new(),
                font: TEXT_FONT,
            });
            ops.push(Op::Unknown {
                key: "Tj".to_string(),
                value: vec![DictItem::String {
                    data: encoded.bytes,
                    literal: false,
                }],
            });
            ops.push(Op::EndTextSection);
        }

        if replaced > 0 {
            warn!(replaced, "Characters outside WinAnsi drawn as '?'");
        }
        self.push_page(ops);
    }

    // -- Output ---------------------------------------------------------------

    /// Serialise the document.
    pub fn finish(mut self) -> Vec<u8> {
        let page_count = self.pages.len();
        let pages = std::mem::take(&mut self.pages);
        self.document.with_pages(pages);

        // `secure` would drop the raw `Tj` operators of text pages.
        let options = PdfSaveOptions {
            secure: false,
            ..PdfSaveOptions::default()
        };
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = self.document.save(&options, &mut warnings);

        debug!(
            pages = page_count,
            warnings = warnings.len(),
            bytes = output.len(),
            "PDF serialised"
        );
        output
    }

    /// Serialise the document and write it to `path`.
    pub fn write_to_file(self, path: impl AsRef<Path>) -> Result<(), PagemillError> {
        let bytes = self.finish();
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use image::{DynamicImage, Rgb, RgbImage};

    fn solid(width: u32, height: u32) -> ImageProcessor {
        ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([200, 30, 30]),
        )))
    }

    #[test]
    fn pages_are_letter_sized() {
        let mut writer = PdfWriter::letter("test");
        let img = solid(10, 10);
        writer.add_image_page(&img, &PageLayout::fit(10, 10, PageSize::LETTER));
        writer.add_text_page(&TextBlock::from_text("hello"));
        assert_eq!(writer.page_count(), 2);

        let reader = PdfReader::from_bytes(&writer.finish()).unwrap();
        assert_eq!(reader.page_count(), 2);
        for page in 1..=2 {
            let (w, h) = reader.page_size(page).unwrap();
            assert!((w - 612.0).abs() < 0.5, "width {w}");
            assert!((h - 792.0).abs() < 0.5, "height {h}");
        }
    }

    #[test]
    fn empty_text_still_makes_a_page() {
        let mut writer = PdfWriter::letter("blank");
        writer.add_text_page(&TextBlock::from_text(""));
        let reader = PdfReader::from_bytes(&writer.finish()).unwrap();
        assert_eq!(reader.page_count(), 1);
    }

    #[test]
    fn text_lines_are_drawn_in_win_ansi() {
        let mut writer = PdfWriter::letter("accents");
        writer.add_text_page(&TextBlock::from_text("ação\n\n€ 5 – “ok”\n日本"));
        let reader = PdfReader::from_bytes(&writer.finish()).unwrap();

        assert_eq!(reader.page_text(1).unwrap(), ["ação", "€ 5 – “ok”", "??"]);
    }

    #[test]
    fn image_is_drawn_at_its_layout() {
        let mut writer = PdfWriter::letter("portrait");
        let layout = PageLayout::fit(1000, 2000, PageSize::LETTER);
        writer.add_image_page(&solid(1000, 2000), &layout);
        let reader = PdfReader::from_bytes(&writer.finish()).unwrap();

        let transforms = reader.page_transforms(1).unwrap();
        assert_eq!(transforms.len(), 1);
        let [a, b, c, d, e, f] = transforms[0];
        assert!((a - 396.0).abs() < 0.01 && (d - 792.0).abs() < 0.01, "{a} x {d}");
        assert_eq!((b, c), (0.0, 0.0));
        assert!((e - 108.0).abs() < 0.01 && f.abs() < 0.01, "at ({e}, {f})");
    }

    #[test]
    fn write_to_file_creates_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let mut writer = PdfWriter::letter("file");
        writer.add_text_page(&TextBlock::from_text("one\ntwo"));
        writer.write_to_file(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
