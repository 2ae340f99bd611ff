// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label inspector: read a generated label back with `lopdf` to report its
// page count, physical size, and the text drawn on it.

use std::path::Path;

use labelwerk_core::error::{LabelwerkError, Result};
use labelwerk_core::types::POINTS_PER_INCH;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, instrument};

/// Read-only view of a PDF label.
pub struct LabelInspector {
    /// The underlying lopdf document.
    document: Document,
}

impl LabelInspector {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            LabelwerkError::RenderFailed(format!("failed to open {}: {}", path_ref.display(), err))
        })?;
        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Load a PDF already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            LabelwerkError::RenderFailed(format!("failed to load PDF from memory: {}", err))
        })?;
        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// MediaBox width and height of a page (1-indexed), in points.
    pub fn page_size_pt(&self, page_number: u32) -> Result<(f32, f32)> {
        let page_id = self.page_id(page_number)?;
        let media_box = self.inherited_attribute(page_id, b"MediaBox").ok_or_else(|| {
            LabelwerkError::RenderFailed(format!("page {page_number} has no MediaBox"))
        })?;
        let coords: Vec<f32> = media_box
            .as_array()
            .map_err(|e| LabelwerkError::RenderFailed(format!("bad MediaBox: {e}")))?
            .iter()
            .filter_map(|o| o.as_float().ok())
            .collect();
        match coords.as_slice() {
            [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
            _ => Err(LabelwerkError::RenderFailed(format!(
                "MediaBox of page {page_number} has {} numbers",
                coords.len()
            ))),
        }
    }

    /// Page size in inches.
    pub fn page_size_in(&self, page_number: u32) -> Result<(f32, f32)> {
        let (w, h) = self.page_size_pt(page_number)?;
        Ok((w / POINTS_PER_INCH, h / POINTS_PER_INCH))
    }

    /// Every string shown by a text operator on the page, in drawing order.
    pub fn page_text(&self, page_number: u32) -> Result<Vec<String>> {
        let page_id = self.page_id(page_number)?;
        let data = self
            .document
            .get_page_content(page_id)
            .map_err(|e| LabelwerkError::RenderFailed(format!("page content: {e}")))?;
        let content = Content::decode(&data)
            .map_err(|e| LabelwerkError::RenderFailed(format!("content stream: {e}")))?;

        let mut strings = Vec::new();
        for op in &content.operations {
            match op.operator.as_str() {
                "Tj" | "'" | "\"" => {
                    if let Some(Object::String(bytes, _)) = op.operands.last() {
                        strings.push(String::from_utf8_lossy(bytes).into_owned());
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        let joined: String = items
                            .iter()
                            .filter_map(|item| match item {
                                Object::String(bytes, _) => {
                                    Some(String::from_utf8_lossy(bytes).into_owned())
                                }
                                _ => None,
                            })
                            .collect();
                        strings.push(joined);
                    }
                }
                _ => {}
            }
        }
        Ok(strings)
    }

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        self.document
            .get_pages()
            .get(&page_number)
            .copied()
            .ok_or_else(|| {
                LabelwerkError::RenderFailed(format!(
                    "page {} out of range (document has {} pages)",
                    page_number,
                    self.page_count()
                ))
            })
    }

    /// Look up a page attribute, following /Parent links for inherited ones.
    fn inherited_attribute(&self, page_id: ObjectId, key: &[u8]) -> Option<Object> {
        let mut current = Some(page_id);
        while let Some(id) = current {
            let dict = self.document.get_dictionary(id).ok()?;
            if let Ok(value) = dict.get(key) {
                return match value {
                    Object::Reference(target) => self.document.get_object(*target).ok().cloned(),
                    other => Some(other.clone()),
                };
            }
            current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }
        None
    }
}
