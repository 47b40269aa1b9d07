// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout: where an image or a block of text lands on a page.
//
// Image pixels map one-to-one onto PDF points: an image that fits the page is
// drawn at its native pixel size in points, and only images larger than the
// page are scaled down.

use pagemill_core::PageSize;

/// Left edge of the text block, in points from the page's left edge.
pub const TEXT_ORIGIN_X: f32 = 50.0;
/// Baseline of the first text line, in points from the page's bottom edge.
pub const TEXT_ORIGIN_Y: f32 = 750.0;
/// Font size of the text pipeline, in points.
pub const TEXT_FONT_SIZE: f32 = 12.0;
/// Distance between consecutive baselines (1.2 x font size).
pub const TEXT_LEADING: f32 = TEXT_FONT_SIZE * 1.2;

/// Placement of one image on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Source width in pixels.
    pub pixel_width: u32,
    /// Source height in pixels.
    pub pixel_height: u32,
    /// `pixel_width / pixel_height`.
    pub aspect_ratio: f32,
    /// Drawn width in points.
    pub width: f32,
    /// Drawn height in points.
    pub height: f32,
    /// Distance from the page's left edge to the image, in points.
    pub x_offset: f32,
    /// Distance from the page's bottom edge to the image, in points.
    pub y_offset: f32,
}

impl PageLayout {
    /// Fit an image of the given pixel size onto `page`, centred.
    ///
    /// Images within the page bounds keep their native size. Larger images are
    /// scaled down with their aspect ratio preserved: landscape images
    /// (aspect > 1) fit the page width, the rest fit the page height, falling
    /// back to the width when a height fit would still overflow it.
    ///
    /// Both pixel dimensions must be non-zero.
    pub fn fit(pixel_width: u32, pixel_height: u32, page: PageSize) -> Self {
        let img_w = pixel_width as f32;
        let img_h = pixel_height as f32;
        let aspect_ratio = img_w / img_h;

        let (width, height) = if img_w > page.width_pt || img_h > page.height_pt {
            if aspect_ratio > 1.0 {
                (page.width_pt, page.width_pt / aspect_ratio)
            } else {
                let height_fit_w = page.height_pt * aspect_ratio;
                if height_fit_w > page.width_pt {
                    (page.width_pt, page.width_pt / aspect_ratio)
                } else {
                    (height_fit_w, page.height_pt)
                }
            }
        } else {
            (img_w, img_h)
        };

        Self {
            pixel_width,
            pixel_height,
            aspect_ratio,
            width,
            height,
            x_offset: (page.width_pt - width) / 2.0,
            y_offset: (page.height_pt - height) / 2.0,
        }
    }

    /// Whether the image was drawn smaller than its native size.
    pub fn is_scaled(&self) -> bool {
        self.width < self.pixel_width as f32 || self.height < self.pixel_height as f32
    }

    /// Horizontal factor from native size (1 px = 1 pt) to drawn size.
    pub fn scale_x(&self) -> f32 {
        self.width / self.pixel_width as f32
    }

    /// Vertical factor from native size (1 px = 1 pt) to drawn size.
    pub fn scale_y(&self) -> f32 {
        self.height / self.pixel_height as f32
    }
}

/// The lines of one text file, ready to be set on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub lines: Vec<String>,
}

impl TextBlock {
    /// Split `text` into lines (`\n`, `\r\n` and bare `\r` all end a line) and
    /// strip trailing whitespace from each. Lines are never re-wrapped.
    pub fn from_text(text: &str) -> Self {
        let normalised = text.replace("\r\n", "\n").replace('\r', "\n");
        let lines = normalised
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect();
        Self { lines }
    }

    /// Baseline position of line `index`, in points.
    ///
    /// Lines past the bottom of the page get negative `y` and are clipped.
    pub fn line_origin(index: usize) -> (f32, f32) {
        (TEXT_ORIGIN_X, TEXT_ORIGIN_Y - index as f32 * TEXT_LEADING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER: PageSize = PageSize::LETTER;

    #[test]
    fn small_image_is_centred_unscaled() {
        let layout = PageLayout::fit(100, 100, LETTER);
        assert_eq!((layout.width, layout.height), (100.0, 100.0));
        assert_eq!(layout.x_offset, 256.0);
        assert_eq!(layout.y_offset, 346.0);
        assert!(!layout.is_scaled());
    }

    #[test]
    fn wide_image_fits_page_width() {
        let layout = PageLayout::fit(2000, 500, LETTER);
        assert_eq!(layout.width, 612.0);
        assert_eq!(layout.height, 153.0);
        assert_eq!(layout.x_offset, 0.0);
        assert_eq!(layout.y_offset, (792.0 - 153.0) / 2.0);
        assert!(layout.is_scaled());
    }

    #[test]
    fn tall_image_fits_page_height() {
        let layout = PageLayout::fit(1000, 2000, LETTER);
        assert_eq!(layout.height, 792.0);
        assert_eq!(layout.width, 396.0);
        assert_eq!(layout.y_offset, 0.0);
        assert_eq!(layout.x_offset, 108.0);
    }

    #[test]
    fn near_square_portrait_falls_back_to_width() {
        // 900x1000 fit to height would be 712.8 wide, wider than the page.
        let layout = PageLayout::fit(900, 1000, LETTER);
        assert_eq!(layout.width, 612.0);
        assert!((layout.height - 680.0).abs() < 1e-3);
        assert!(layout.height <= LETTER.height_pt);
    }

    #[test]
    fn scaled_image_keeps_aspect_ratio() {
        for (w, h) in [(1300, 1000), (3000, 4000), (5000, 800), (640, 900), (800, 800)] {
            let layout = PageLayout::fit(w, h, LETTER);
            assert!(layout.width <= LETTER.width_pt);
            assert!(layout.height <= LETTER.height_pt);
            assert!((layout.scale_x() - layout.scale_y()).abs() < 1e-4, "{w}x{h}");
            let fitted_width = layout.width == LETTER.width_pt;
            let fitted_height = layout.height == LETTER.height_pt;
            assert!(fitted_width || fitted_height, "{w}x{h}");
        }
    }

    #[test]
    fn one_axis_over_bounds_still_scales() {
        let layout = PageLayout::fit(100, 1000, LETTER);
        assert_eq!(layout.height, 792.0);
        assert!((layout.width - 79.2).abs() < 1e-3);
    }

    #[test]
    fn unscaled_offsets_are_non_negative() {
        let layout = PageLayout::fit(612, 792, LETTER);
        assert_eq!((layout.x_offset, layout.y_offset), (0.0, 0.0));
        assert!(!layout.is_scaled());
    }

    #[test]
    fn text_lines_strip_trailing_whitespace_only() {
        let block = TextBlock::from_text("  first  \nsecond\t\n\nlast");
        assert_eq!(block.lines, ["  first", "second", "", "last"]);
    }

    #[test]
    fn text_line_endings_are_normalised() {
        let block = TextBlock::from_text("a\r\nb\rc\n");
        assert_eq!(block.lines, ["a", "b", "c"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(TextBlock::from_text("").lines.is_empty());
    }

    #[test]
    fn line_origins_step_down_by_leading() {
        assert_eq!(TextBlock::line_origin(0), (50.0, 750.0));
        let (_, y) = TextBlock::line_origin(10);
        assert!((y - (750.0 - 144.0)).abs() < 1e-3);
    }
}
