//! Markdown conversion report.
//!
//! Renders a per-conversion report combining file info, structure
//! analysis, audit issues, and the running stats summary. Written next to
//! the output document when the user asks for it.

use std::path::Path;

use chrono::Utc;

use crate::analysis::StructureAnalysis;
use crate::stats::ConversionStats;

/// Everything a report needs about one finished conversion.
#[derive(Debug)]
pub struct ReportInput<'a> {
    pub source: &'a Path,
    pub output: &'a Path,
    /// Winning extraction backend.
    pub backend: &'a str,
    /// Answering rewrite model, when the rewrite was not degraded.
    pub model: Option<&'a str>,
    /// Audit issues found in the final text.
    pub issues: &'a [String],
    pub analysis: &'a StructureAnalysis,
    pub elapsed_secs: f64,
}

/// Render the conversion report as Markdown.
pub fn render_report(input: &ReportInput<'_>, stats: &ConversionStats) -> String {
    let mut report = String::new();

    report.push_str("# Conversion Report\n\n");
    report.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    report.push_str("## Files\n\n");
    report.push_str(&format!("- Input: {}\n", input.source.display()));
    report.push_str(&format!("- Output: {}\n", input.output.display()));
    report.push_str(&format!("- Extraction backend: {}\n", input.backend));
    report.push_str(&format!(
        "- Rewrite model: {}\n",
        input.model.unwrap_or("none (degraded)")
    ));
    report.push_str(&format!("- Elapsed: {:.1}s\n\n", input.elapsed_secs));

    let analysis = input.analysis;
    report.push_str("## Document Structure\n\n");
    report.push_str(&format!("- Headings: {}\n", analysis.counts.headings));
    report.push_str(&format!("- Paragraphs: {}\n", analysis.counts.paragraphs));
    report.push_str(&format!("- Blank blocks: {}\n", analysis.counts.blanks));
    report.push_str(&format!("- Words: {}\n", analysis.word_count));
    report.push_str(&format!(
        "- Heading ratio: {:.1}%\n",
        analysis.heading_ratio * 100.0
    ));
    report.push_str(&format!("- Structure quality: {}\n\n", analysis.quality));

    report.push_str("## Quality Issues\n\n");
    if input.issues.is_empty() {
        report.push_str("No residual issues detected.\n\n");
    } else {
        for issue in input.issues {
            report.push_str(&format!("- {issue}\n"));
        }
        report.push('\n');
    }

    report.push_str("## Running Statistics\n\n");
    report.push_str("```\n");
    report.push_str(&stats.render_summary());
    report.push_str("\n```\n");

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_blocks;
    use pagemend_shared::Block;

    fn sample_analysis() -> StructureAnalysis {
        analyze_blocks(&[
            Block::Heading {
                text: "TITLE".into(),
                level: 1,
            },
            Block::Paragraph {
                text: "Body text here.".into(),
            },
        ])
    }

    #[test]
    fn report_includes_all_sections() {
        let analysis = sample_analysis();
        let issues = vec!["2 potential merged-word boundaries".to_string()];
        let input = ReportInput {
            source: Path::new("in.pdf"),
            output: Path::new("out.md"),
            backend: "pdfium",
            model: Some("gemini-1.5-flash"),
            issues: &issues,
            analysis: &analysis,
            elapsed_secs: 3.2,
        };

        let report = render_report(&input, &ConversionStats::default());

        assert!(report.contains("# Conversion Report"));
        assert!(report.contains("in.pdf"));
        assert!(report.contains("pdfium"));
        assert!(report.contains("gemini-1.5-flash"));
        assert!(report.contains("merged-word boundaries"));
        assert!(report.contains("Running Statistics"));
    }

    #[test]
    fn degraded_rewrite_is_labelled() {
        let analysis = sample_analysis();
        let input = ReportInput {
            source: Path::new("in.pdf"),
            output: Path::new("out.md"),
            backend: "lopdf",
            model: None,
            issues: &[],
            analysis: &analysis,
            elapsed_secs: 0.4,
        };

        let report = render_report(&input, &ConversionStats::default());
        assert!(report.contains("none (degraded)"));
        assert!(report.contains("No residual issues detected."));
    }
}
