// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open and inspect finished PDF documents using the `lopdf`
// crate. Reports page geometry, the text drawn on a page, and where images
// were placed.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use pagemill_core::error::PagemillError;
use tracing::{debug, info, instrument};

/// Read-only view of an existing PDF file.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PagemillError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            PagemillError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, PagemillError> {
        let document = Document::load_mem(data).map_err(|err| {
            PagemillError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height in points of page `page_number` (1-indexed), taken
    /// from its `/MediaBox`, which may be inherited from the page tree.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32), PagemillError> {
        let page_id = self.page_id(page_number)?;
        let media_box = self.inherited_attribute(page_id, b"MediaBox")?;
        let coords = media_box
            .as_array()
            .map_err(|err| PagemillError::PdfError(format!("malformed MediaBox: {}", err)))?
            .iter()
            .map(|obj| self.resolve(obj).and_then(as_number))
            .collect::<Result<Vec<f32>, _>>()?;

        match coords.as_slice() {
            [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
            _ => Err(PagemillError::PdfError(format!(
                "MediaBox has {} entries, expected 4",
                coords.len()
            ))),
        }
    }

    /// Text shown on page `page_number`, one entry per text section, decoded
    /// through the page fonts' encodings.
    pub fn page_text(&self, page_number: u32) -> Result<Vec<String>, PagemillError> {
        self.page_id(page_number)?;
        let text = self.document.extract_text(&[page_number]).map_err(|err| {
            PagemillError::PdfError(format!("page {}: text extraction failed: {}", page_number, err))
        })?;
        Ok(text.lines().map(str::to_owned).collect())
    }

    /// Transformation matrices (`cm` operands `[a b c d e f]`) applied on page
    /// `page_number`, in drawing order. For an image page the single matrix
    /// is `[width 0 0 height x y]` in points.
    pub fn page_transforms(&self, page_number: u32) -> Result<Vec<[f32; 6]>, PagemillError> {
        let page_id = self.page_id(page_number)?;
        let content = self
            .document
            .get_and_decode_page_content(page_id)
            .map_err(|err| {
                PagemillError::PdfError(format!("page {}: malformed content: {}", page_number, err))
            })?;

        let mut transforms = Vec::new();
        for op in content.operations.iter().filter(|op| op.operator == "cm") {
            let values = op
                .operands
                .iter()
                .map(as_number)
                .collect::<Result<Vec<f32>, _>>()?;
            let matrix: [f32; 6] = values.as_slice().try_into().map_err(|_| {
                PagemillError::PdfError(format!("cm has {} operands, expected 6", values.len()))
            })?;
            transforms.push(matrix);
        }
        debug!(page = page_number, count = transforms.len(), "Read page transforms");
        Ok(transforms)
    }

    fn page_id(&self, page_number: u32) -> Result<ObjectId, PagemillError> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            PagemillError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }

    /// Look up `key` on a page dictionary, walking `/Parent` links until found.
    fn inherited_attribute(&self, page_id: ObjectId, key: &[u8]) -> Result<&Object, PagemillError> {
        let mut node: &Dictionary = self.dictionary(page_id)?;
        loop {
            if let Ok(value) = node.get(key) {
                return self.resolve(value);
            }
            let parent = node
                .get(b"Parent")
                .and_then(Object::as_reference)
                .map_err(|_| {
                    PagemillError::PdfError(format!(
                        "page {:?} has no /{}",
                        page_id,
                        String::from_utf8_lossy(key)
                    ))
                })?;
            node = self.dictionary(parent)?;
        }
    }

    fn dictionary(&self, id: ObjectId) -> Result<&Dictionary, PagemillError> {
        self.document
            .get_dictionary(id)
            .map_err(|err| PagemillError::PdfError(format!("object {:?}: {}", id, err)))
    }

    /// Follow an indirect reference, if `obj` is one.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Result<&'a Object, PagemillError> {
        match obj {
            Object::Reference(id) => self
                .document
                .get_object(*id)
                .map_err(|err| PagemillError::PdfError(format!("object {:?}: {}", id, err))),
            other => Ok(other),
        }
    }
}

fn as_number(obj: &Object) -> Result<f32, PagemillError> {
    match obj {
        Object::Integer(i) => Ok(*i as f32),
        Object::Real(r) => Ok(*r),
        other => Err(PagemillError::PdfError(format!(
            "expected a number, found {:?}",
            other
        ))),
    }
}
