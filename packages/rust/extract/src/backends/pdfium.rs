//! Layout-aware extraction via the Pdfium library.
//!
//! Richest of the three engines: Pdfium reconstructs reading order from
//! glyph positions, so it goes first in the priority order. Requires the
//! native pdfium library to be present at runtime; a missing library is an
//! ordinary backend failure and the chain moves on.

use std::path::Path;

use pdfium_render::prelude::*;
use tracing::debug;

use pagemend_shared::{PagemendError, Result};

use super::ExtractionBackend;

pub struct PdfiumBackend;

impl ExtractionBackend for PdfiumBackend {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bindings = Pdfium::bind_to_system_library().map_err(|e| {
            PagemendError::Extraction(format!("pdfium library unavailable: {e:?}"))
        })?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PagemendError::Extraction(format!("pdfium load failed: {e:?}")))?;

        let mut text = String::new();
        for page in document.pages().iter() {
            let page_text = page
                .text()
                .map_err(|e| PagemendError::Extraction(format!("pdfium page text failed: {e:?}")))?;
            text.push_str(&page_text.all());
            text.push_str("\n\n");
        }

        debug!(pages = document.pages().len(), chars = text.len(), "pdfium extraction complete");
        Ok(text)
    }
}
