//! Content-stream text dump via `lopdf`.
//!
//! Simplest and most compatible engine: walks each page's content stream
//! and concatenates the text operators. Last in the priority order because
//! it makes no attempt at layout reconstruction. Pages that fail to decode
//! are skipped rather than failing the whole document.

use std::path::Path;

use tracing::debug;

use pagemend_shared::{PagemendError, Result};

use super::ExtractionBackend;

pub struct LopdfBackend;

impl ExtractionBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let document = lopdf::Document::load(path)
            .map_err(|e| PagemendError::Extraction(format!("lopdf load failed: {e}")))?;

        let mut text = String::new();
        let mut skipped = 0usize;

        for (page_number, _) in document.get_pages() {
            match document.extract_text(&[page_number]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push_str("\n\n");
                }
                Err(e) => {
                    debug!(page = page_number, error = %e, "page decode failed, skipping");
                    skipped += 1;
                }
            }
        }

        debug!(chars = text.len(), skipped, "lopdf extraction complete");
        Ok(text)
    }
}
