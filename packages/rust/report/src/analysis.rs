//! Structure analysis over an assembled block sequence.
//!
//! Rates how document-like the reconstruction came out: a healthy document
//! has some headings but is not wall-to-wall headings. Advisory only, used
//! in reports and the diagnostics sink.

use serde::Serialize;

use pagemend_shared::{Block, BlockCounts};

/// Heading share of content blocks considered well-structured.
const GOOD_RATIO_MIN: f64 = 0.05;
const GOOD_RATIO_MAX: f64 = 0.30;

/// Quality rating for the reconstructed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureQuality {
    /// Headings and paragraphs in healthy proportion.
    Good,
    /// Few or no headings relative to body text.
    FewHeadings,
    /// Heading-heavy: the classifier may be over-triggering.
    ManyHeadings,
    /// No headings or no paragraphs at all.
    NoStructure,
}

impl std::fmt::Display for StructureQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Good => "good",
            Self::FewHeadings => "poor (few headings)",
            Self::ManyHeadings => "poor (too many headings)",
            Self::NoStructure => "poor (no clear structure)",
        };
        f.write_str(label)
    }
}

/// Summary of an assembled document's shape.
#[derive(Debug, Clone, Serialize)]
pub struct StructureAnalysis {
    pub counts: BlockCounts,
    /// Words across headings and paragraphs.
    pub word_count: usize,
    /// Headings as a share of content blocks.
    pub heading_ratio: f64,
    pub quality: StructureQuality,
}

/// Analyze an assembled block sequence.
pub fn analyze_blocks(blocks: &[Block]) -> StructureAnalysis {
    let counts = BlockCounts::tally(blocks);

    let word_count = blocks
        .iter()
        .filter_map(Block::text)
        .map(|t| t.split_whitespace().count())
        .sum();

    let heading_ratio = if counts.content() > 0 {
        counts.headings as f64 / counts.content() as f64
    } else {
        0.0
    };

    let quality = if counts.headings == 0 || counts.paragraphs == 0 {
        StructureQuality::NoStructure
    } else if heading_ratio < GOOD_RATIO_MIN {
        StructureQuality::FewHeadings
    } else if heading_ratio > GOOD_RATIO_MAX {
        StructureQuality::ManyHeadings
    } else {
        StructureQuality::Good
    };

    StructureAnalysis {
        counts,
        word_count,
        heading_ratio,
        quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> Block {
        Block::Heading {
            text: text.into(),
            level: 1,
        }
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph { text: text.into() }
    }

    #[test]
    fn balanced_document_rates_good() {
        let mut blocks = vec![heading("INTRO")];
        for i in 0..9 {
            blocks.push(paragraph(&format!("Paragraph number {i} with several words.")));
        }

        let analysis = analyze_blocks(&blocks);
        assert_eq!(analysis.quality, StructureQuality::Good);
        assert_eq!(analysis.counts.headings, 1);
        assert_eq!(analysis.counts.paragraphs, 9);
        assert!(analysis.word_count > 9);
    }

    #[test]
    fn heading_free_text_rates_no_structure() {
        let blocks = vec![paragraph("just body"), paragraph("more body")];
        assert_eq!(
            analyze_blocks(&blocks).quality,
            StructureQuality::NoStructure
        );
    }

    #[test]
    fn heading_heavy_text_rates_many_headings() {
        let blocks = vec![
            heading("A"),
            heading("B"),
            heading("C"),
            paragraph("lone body"),
        ];
        assert_eq!(
            analyze_blocks(&blocks).quality,
            StructureQuality::ManyHeadings
        );
    }

    #[test]
    fn sparse_headings_rate_few_headings() {
        let mut blocks = vec![heading("ONLY ONE")];
        for i in 0..30 {
            blocks.push(paragraph(&format!("body {i}")));
        }
        assert_eq!(
            analyze_blocks(&blocks).quality,
            StructureQuality::FewHeadings
        );
    }

    #[test]
    fn blanks_do_not_affect_ratio() {
        let blocks = vec![heading("H"), Block::Blank, Block::Blank, paragraph("p")];
        let analysis = analyze_blocks(&blocks);
        assert!((analysis.heading_ratio - 0.5).abs() < 1e-9);
        assert_eq!(analysis.counts.blanks, 2);
    }
}
