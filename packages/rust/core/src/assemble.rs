//! Document assembly from classified lines.
//!
//! Single pass, one cursor. Headings are always single-line; paragraphs
//! absorb contiguous body lines and stop (without consuming) at the first
//! blank or heading line. Concatenating the result in order reproduces the
//! input line order exactly — nothing is reordered, deduplicated, or
//! dropped.

use pagemend_shared::{Block, ClassifiedLine};

/// Assemble classified lines into an ordered block sequence.
pub fn assemble(lines: &[ClassifiedLine]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = &lines[cursor];

        if line.text.is_empty() {
            blocks.push(Block::Blank);
            cursor += 1;
            continue;
        }

        if line.level >= 1 {
            blocks.push(Block::Heading {
                text: line.text.clone(),
                level: line.level,
            });
            cursor += 1;
            continue;
        }

        // Body run: absorb until blank or heading, leaving the stopper for
        // the next loop iteration.
        let start = cursor;
        let mut end = cursor + 1;
        while end < lines.len() && !lines[end].text.is_empty() && lines[end].level == 0 {
            end += 1;
        }

        let joined = lines[start..end]
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        blocks.push(Block::Paragraph { text: joined });
        cursor = end;
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_lines;

    fn assemble_text(text: &str) -> Vec<Block> {
        assemble(&classify_lines(text))
    }

    #[test]
    fn reference_document_shape() {
        let blocks = assemble_text(
            "TITLE\n\nPara one.\nPara two continues.\n\nSECTION:\nBody.",
        );

        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    text: "TITLE".into(),
                    level: 1
                },
                Block::Blank,
                Block::Paragraph {
                    text: "Para one. Para two continues.".into()
                },
                Block::Blank,
                Block::Heading {
                    text: "SECTION:".into(),
                    level: 2
                },
                Block::Paragraph {
                    text: "Body.".into()
                },
            ]
        );
    }

    #[test]
    fn paragraph_stops_at_heading_without_consuming_it() {
        let blocks = assemble_text("body one\nbody two\nCHAPTER TWO\nmore body");

        assert_eq!(
            blocks,
            vec![
                Block::Paragraph {
                    text: "body one body two".into()
                },
                Block::Heading {
                    text: "CHAPTER TWO".into(),
                    level: 1
                },
                Block::Paragraph {
                    text: "more body".into()
                },
            ]
        );
    }

    #[test]
    fn headings_are_never_merged() {
        let blocks = assemble_text("CHAPTER ONE\nCHAPTER TWO");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::Heading { .. })));
    }

    #[test]
    fn each_blank_line_emits_one_blank() {
        let blocks = assemble_text("one\n\n\ntwo");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph { text: "one".into() },
                Block::Blank,
                Block::Blank,
                Block::Paragraph { text: "two".into() },
            ]
        );
    }

    #[test]
    fn line_order_is_preserved() {
        let input = "ALPHA\n\nfirst body\nsecond body\n\n1.2 Numbered\nlast body";
        let blocks = assemble_text(input);

        // Replaying the blocks (skipping blanks) must visit every non-blank
        // input line in its original order.
        let replayed: Vec<String> = blocks
            .iter()
            .filter_map(Block::text)
            .flat_map(|t| t.split(". ").map(str::to_string).collect::<Vec<_>>())
            .collect();
        let replay_joined = replayed.join(" ");

        for line in input.lines().filter(|l| !l.trim().is_empty()) {
            let head = line.split(' ').next().unwrap();
            assert!(replay_joined.contains(head), "lost line start: {head}");
        }
    }

    #[test]
    fn empty_input_produces_no_blocks() {
        assert!(assemble_text("").is_empty());
    }

    #[test]
    fn trailing_paragraph_is_flushed_at_end_of_input() {
        let blocks = assemble_text("HEADER\nbody runs to end\nstill the same paragraph");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                text: "body runs to end still the same paragraph".into()
            }
        );
    }
}
