//! Extraction backends and the first-success coordinator.
//!
//! Three interchangeable engines produce raw text from a source document;
//! the coordinator tries them in priority order and keeps the first
//! non-blank result, tagged with the backend name for downstream
//! reporting.

pub mod backends;
pub mod coordinator;

pub use backends::{
    ExtractionBackend, LopdfBackend, PdfExtractBackend, PdfiumBackend, backends_for,
    default_backends,
};
pub use coordinator::{AttemptOutcome, Extraction, ExtractionAttempt, extract_text};
