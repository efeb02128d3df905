//! Extraction backend trait and the built-in engines.
//!
//! Each backend is a thin adapter over one extraction engine: invocation
//! and error capture only, no repair logic. Backends open the source file
//! themselves and release it on every exit path. The default priority
//! order is richest-layout-aware first, simplest last.

mod content;
mod pdfium;
mod pdftext;

use std::path::Path;

use pagemend_shared::{PagemendError, Result};

pub use content::LopdfBackend;
pub use pdfium::PdfiumBackend;
pub use pdftext::PdfExtractBackend;

/// Uniform interface over the interchangeable extraction engines.
///
/// An error from one backend must never abort the chain; the coordinator
/// records it and moves on.
pub trait ExtractionBackend: Send + Sync {
    /// Stable backend identifier used in config, logs, and reports.
    fn name(&self) -> &'static str;

    /// Extract the full text of the document at `path`.
    fn extract(&self, path: &Path) -> Result<String>;
}

/// The built-in backends in default priority order.
pub fn default_backends() -> Vec<Box<dyn ExtractionBackend>> {
    vec![
        Box::new(PdfiumBackend),
        Box::new(PdfExtractBackend),
        Box::new(LopdfBackend),
    ]
}

/// Resolve a configured backend order into backend instances.
/// Unknown names are a config error, caught before any extraction runs.
pub fn backends_for(order: &[String]) -> Result<Vec<Box<dyn ExtractionBackend>>> {
    order
        .iter()
        .map(|name| -> Result<Box<dyn ExtractionBackend>> {
            match name.as_str() {
                "pdfium" => Ok(Box::new(PdfiumBackend)),
                "pdf-extract" => Ok(Box::new(PdfExtractBackend)),
                "lopdf" => Ok(Box::new(LopdfBackend)),
                other => Err(PagemendError::config(format!(
                    "unknown extraction backend: {other}"
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_richest_first() {
        let names: Vec<_> = default_backends().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["pdfium", "pdf-extract", "lopdf"]);
    }

    #[test]
    fn backends_for_respects_configured_order() {
        let order = vec!["lopdf".to_string(), "pdfium".to_string()];
        let backends = backends_for(&order).expect("known names");
        let names: Vec<_> = backends.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["lopdf", "pdfium"]);
    }

    #[test]
    fn backends_for_rejects_unknown_name() {
        let order = vec!["ghostscript".to_string()];
        let err = match backends_for(&order) {
            Ok(_) => panic!("unknown backend"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("ghostscript"));
    }
}
