//! Document writers consuming the assembled block sequence.
//!
//! The pipeline hands its ordered `Vec<Block>` to a [`DocumentSink`]; the
//! bundled [`MarkdownWriter`] serializes headings, paragraphs, and blanks
//! to Markdown on disk. Other formats plug in behind the same trait.

use std::path::Path;

use tracing::{debug, instrument};

use pagemend_shared::{Block, PagemendError, Result};

/// A destination for an assembled document.
///
/// Writers are fatal collaborators: a failed write propagates and the
/// conversion fails, so no partial document is ever reported as success.
pub trait DocumentSink {
    /// Serialize `blocks` to `path`.
    fn write(&self, blocks: &[Block], path: &Path) -> Result<()>;

    /// Human-readable sink name for tracing.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Markdown writer
// ---------------------------------------------------------------------------

/// Serializes blocks as Markdown: `#`-prefixed headings, plain paragraphs,
/// and blank lines for vertical spacing.
pub struct MarkdownWriter;

impl DocumentSink for MarkdownWriter {
    #[instrument(skip(self, blocks), fields(path = %path.display(), blocks = blocks.len()))]
    fn write(&self, blocks: &[Block], path: &Path) -> Result<()> {
        let rendered = render_markdown(blocks);

        // Write to a temp sibling then rename, so a crash mid-write never
        // leaves a truncated document behind.
        let file_name = path
            .file_name()
            .ok_or_else(|| PagemendError::Writer(format!("not a file path: {}", path.display())))?;
        let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        std::fs::write(&temp, &rendered)
            .map_err(|e| PagemendError::Writer(format!("write {}: {e}", temp.display())))?;
        std::fs::rename(&temp, path)
            .map_err(|e| PagemendError::Writer(format!("rename to {}: {e}", path.display())))?;

        debug!(bytes = rendered.len(), "document written");
        Ok(())
    }

    fn name(&self) -> &str {
        "markdown"
    }
}

/// Render a block sequence to a Markdown string.
///
/// Pure function so tests and previews can snapshot output without touching
/// the filesystem.
pub fn render_markdown(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Heading { text, level } => {
                let hashes = "#".repeat((*level).clamp(1, 6) as usize);
                out.push_str(&hashes);
                out.push(' ');
                out.push_str(text);
                out.push('\n');
            }
            Block::Paragraph { text } => {
                out.push_str(text);
                out.push('\n');
            }
            Block::Blank => {
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_blocks() -> Vec<Block> {
        vec![
            Block::Heading {
                text: "TITLE".into(),
                level: 1,
            },
            Block::Blank,
            Block::Paragraph {
                text: "First paragraph.".into(),
            },
            Block::Blank,
            Block::Heading {
                text: "SECTION:".into(),
                level: 2,
            },
            Block::Paragraph {
                text: "Body.".into(),
            },
        ]
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pagemend-writer-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn render_maps_levels_to_hashes() {
        let rendered = render_markdown(&sample_blocks());
        assert_eq!(
            rendered,
            "# TITLE\n\nFirst paragraph.\n\n## SECTION:\nBody.\n"
        );
    }

    #[test]
    fn render_preserves_block_order() {
        let rendered = render_markdown(&sample_blocks());
        let title = rendered.find("TITLE").unwrap();
        let para = rendered.find("First paragraph.").unwrap();
        let section = rendered.find("SECTION:").unwrap();
        assert!(title < para && para < section);
    }

    #[test]
    fn write_creates_file_and_leaves_no_temp() {
        let dir = temp_dir();
        let target = dir.join("out.md");

        MarkdownWriter.write(&sample_blocks(), &target).unwrap();

        let content = std::fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("# TITLE"));

        for entry in std::fs::read_dir(&dir).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_to_bad_path_is_writer_error() {
        let target = Path::new("/nonexistent-dir/deep/out.md");
        let err = MarkdownWriter.write(&sample_blocks(), target).unwrap_err();
        assert!(matches!(err, PagemendError::Writer(_)));
    }
}
