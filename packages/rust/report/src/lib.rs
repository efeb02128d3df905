//! Conversion statistics, structure analysis, and report rendering.
//!
//! Everything here is advisory: the pipeline produces documents whether or
//! not stats are being recorded or reports written.

mod analysis;
mod report;
mod stats;

pub use analysis::{StructureAnalysis, StructureQuality, analyze_blocks};
pub use report::{ReportInput, render_report};
pub use stats::{ConversionStats, RecordedConversion};
