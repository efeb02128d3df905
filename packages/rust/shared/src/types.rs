//! Core domain types for pagemend conversions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a line that can still be classified as a heading.
/// Longer lines are always body text, regardless of other cues.
pub const HEADING_LENGTH_CAP: usize = 100;

// ---------------------------------------------------------------------------
// JobId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one conversion request (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    /// Generate a new time-sortable job identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// ClassifiedLine
// ---------------------------------------------------------------------------

/// One trimmed input line with its heading level (0 = body text) and the
/// index it held in the original line sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Trimmed line text.
    pub text: String,
    /// Heading level: 0 for body, 1–3 for headings.
    pub level: u8,
    /// Zero-based index in the original line sequence.
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// One structurally classified unit of output. The ordered `Vec<Block>` is
/// the sole artifact handed to a document writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A single-line heading with its level (1–3).
    Heading { text: String, level: u8 },
    /// Body text: contiguous non-heading lines joined with single spaces.
    Paragraph { text: String },
    /// A blank source line, rendered as vertical spacing by writers.
    Blank,
}

impl Block {
    /// The text carried by this block, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } => Some(text),
            Block::Blank => None,
        }
    }
}

/// Counts of each block kind in an assembled document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    pub headings: usize,
    pub paragraphs: usize,
    pub blanks: usize,
}

impl BlockCounts {
    /// Tally block kinds over an assembled sequence.
    pub fn tally(blocks: &[Block]) -> Self {
        let mut counts = Self::default();
        for block in blocks {
            match block {
                Block::Heading { .. } => counts.headings += 1,
                Block::Paragraph { .. } => counts.paragraphs += 1,
                Block::Blank => counts.blanks += 1,
            }
        }
        counts
    }

    /// Total content blocks (headings + paragraphs).
    pub fn content(&self) -> usize {
        self.headings + self.paragraphs
    }
}
