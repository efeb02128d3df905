//! Core pipeline orchestration and structure reconstruction for pagemend.
//!
//! This crate ties extraction, normalization, rewrite, classification, and
//! assembly into the end-to-end [`pipeline::convert`] workflow, and owns
//! the two structure stages: the per-line heading [`classify`]-er and the
//! block [`assemble`]-r.

pub mod assemble;
pub mod classify;
pub mod pipeline;

pub use assemble::assemble;
pub use classify::{classify, classify_lines};
pub use pipeline::{
    ConversionDiagnostics, ConvertOutcome, ConvertRequest, DiagnosticsSink, ProgressReporter,
    SilentProgress, convert,
};
