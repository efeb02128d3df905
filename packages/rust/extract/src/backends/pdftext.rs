//! Pure-Rust extraction via the `pdf-extract` crate.
//!
//! Middle of the priority order: no native dependency, decent text
//! recovery, weaker reading-order reconstruction than Pdfium.

use std::path::Path;

use tracing::debug;

use pagemend_shared::{PagemendError, Result};

use super::ExtractionBackend;

pub struct PdfExtractBackend;

impl ExtractionBackend for PdfExtractBackend {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .map_err(|e| PagemendError::Extraction(format!("read {}: {e}", path.display())))?;

        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| PagemendError::Extraction(format!("pdf-extract failed: {e}")))?;

        debug!(chars = text.len(), "pdf-extract extraction complete");
        Ok(text)
    }
}
