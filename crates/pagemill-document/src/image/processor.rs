// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: load JPEG/PNG inputs, flatten them to RGB for the PDF
// writer, and render preview thumbnails. Operates on in-memory images using
// the `image` crate.

use std::io::Cursor;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, RgbImage};
use pagemill_core::error::PagemillError;
use tracing::{debug, info, instrument};

/// A single in-memory image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, so calls
/// chain:
///
/// ```ignore
/// let uri = ImageProcessor::open("photo.jpg")?
///     .thumbnail(200)
///     .to_data_uri()?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PagemillError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            PagemillError::ImageProcessing(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, PagemillError> {
        let img = image::load_from_memory(data).map_err(|err| {
            PagemillError::ImageProcessing(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Flatten to 8-bit RGB, dropping alpha and converting grey or palette
    /// images.
    pub fn into_rgb(self) -> Self {
        match self.image {
            DynamicImage::ImageRgb8(_) => self,
            other => Self {
                image: DynamicImage::ImageRgb8(other.to_rgb8()),
            },
        }
    }

    /// Shrink the image to fit within `max` x `max`, preserving aspect ratio.
    /// Images already inside the bound are returned unchanged; nothing is
    /// ever enlarged.
    #[instrument(skip(self), fields(max))]
    pub fn thumbnail(self, max: u32) -> Self {
        if self.image.width() <= max && self.image.height() <= max {
            return self;
        }
        let thumb = self.image.thumbnail(max, max);
        debug!(
            new_w = thumb.width(),
            new_h = thumb.height(),
            "Thumbnail rendered"
        );
        Self { image: thumb }
    }

    // -- Output ---------------------------------------------------------------

    /// Copy the pixels out as an RGB buffer.
    pub fn to_rgb8(&self) -> RgbImage {
        self.image.to_rgb8()
    }

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PagemillError> {
        let mut buffer = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|err| {
                PagemillError::ImageProcessing(format!("image encoding failed: {}", err))
            })?;
        Ok(buffer)
    }

    /// Encode the current image as a `data:image/png;base64,...` URI, suitable
    /// for an `<img src>`.
    pub fn to_data_uri(&self) -> Result<String, PagemillError> {
        let png = self.to_png_bytes()?;
        let b64 = STANDARD.encode(&png);
        debug!(bytes = b64.len(), "Encoded preview as base64 PNG");
        Ok(format!("data:image/png;base64,{b64}"))
    }
}

/// Render the preview thumbnail for `path` as a data URI.
///
/// Returns `Ok(None)` for paths that are not images; the caller shows a
/// placeholder instead.
pub fn preview_data_uri(path: &Path, max: u32) -> Result<Option<String>, PagemillError> {
    if pagemill_core::InputKind::of_path(path) != Some(pagemill_core::InputKind::Image) {
        return Ok(None);
    }
    let uri = ImageProcessor::open(path)?.thumbnail(max).to_data_uri()?;
    Ok(Some(uri))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn rgba(width: u32, height: u32) -> ImageProcessor {
        ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([10, 20, 30, 128]),
        )))
    }

    #[test]
    fn alpha_is_dropped() {
        let rgb = rgba(4, 3).into_rgb();
        assert!(matches!(rgb.as_dynamic(), DynamicImage::ImageRgb8(_)));
        assert_eq!((rgb.width(), rgb.height()), (4, 3));
        assert_eq!(rgb.to_rgb8().get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn thumbnail_bounds_both_axes() {
        let thumb = rgba(800, 400).thumbnail(200);
        assert_eq!((thumb.width(), thumb.height()), (200, 100));

        let thumb = rgba(300, 900).thumbnail(200);
        assert!(thumb.height() <= 200 && thumb.width() <= 200);
        assert_eq!(thumb.height(), 200);
    }

    #[test]
    fn thumbnail_never_upscales() {
        let thumb = rgba(50, 20).thumbnail(200);
        assert_eq!((thumb.width(), thumb.height()), (50, 20));
    }

    #[test]
    fn png_roundtrip_through_bytes() {
        let png = rgba(5, 5).to_png_bytes().unwrap();
        let decoded = ImageProcessor::from_bytes(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 5));
    }

    #[test]
    fn data_uri_has_png_prefix() {
        let uri = rgba(2, 2).to_data_uri().unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = ImageProcessor::from_bytes(b"not an image").err().unwrap();
        assert!(matches!(err, PagemillError::ImageProcessing(_)));
    }

    #[test]
    fn text_files_have_no_preview() {
        let preview = preview_data_uri(Path::new("notes.txt"), 200).unwrap();
        assert!(preview.is_none());
    }

    #[test]
    fn image_preview_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        rgba(600, 300).as_dynamic().save(&path).unwrap();
        let preview = preview_data_uri(&path, 200).unwrap();
        assert!(preview.unwrap().starts_with("data:image/png;base64,"));
    }
}
