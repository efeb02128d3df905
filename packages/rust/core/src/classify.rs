//! Per-line heading classification.
//!
//! An ordered table of tagged predicate→level rules, evaluated top to
//! bottom with first-match-wins. The ordering is deliberate: a line
//! matching several heuristics gets the most specific structural level,
//! and the ordering stays auditable because each rule is a named entry
//! rather than a branch in a conditional cascade.

use std::sync::LazyLock;

use regex::Regex;

use pagemend_shared::{ClassifiedLine, HEADING_LENGTH_CAP};

/// Uppercase marker tokens opening a level-1 heading.
const LEVEL1_MARKERS: &[&str] = &["CHAPTER", "PART", "APPENDIX", "SECTION I"];

/// Title-case marker tokens opening a level-2 heading.
const LEVEL2_MARKERS: &[&str] = &["Chapter", "Section", "Part"];

/// Structural marker tokens opening a level-3 heading.
const LEVEL3_MARKERS: &[&str] = &["Introduction", "Conclusion", "Summary", "Overview"];

/// Maximum length of an all-caps line still treated as a level-1 heading.
const ALL_CAPS_CAP: usize = 60;

/// Maximum length of a trailing-colon line still treated as a level-2 heading.
const COLON_CAP: usize = 50;

/// Largest `N.` accepted as a numbered top-level heading.
const MAX_HEADING_NUMBER: u32 = 20;

/// `N.` not followed by another digit: a numbered top-level heading.
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2})\.(?:[^0-9]|$)").expect("valid regex"));

/// `N.M` sub-numbering.
static SUB_NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}\.[0-9]+").expect("valid regex"));

/// One entry in the classification table.
struct HeadingRule {
    name: &'static str,
    level: u8,
    matches: fn(&str) -> bool,
}

/// The rule table, in priority order. First match wins.
static RULES: &[HeadingRule] = &[
    HeadingRule {
        name: "all-caps title",
        level: 1,
        matches: is_all_caps_title,
    },
    HeadingRule {
        name: "level-1 marker",
        level: 1,
        matches: |line| has_marker_prefix(line, LEVEL1_MARKERS),
    },
    HeadingRule {
        name: "title-case marker",
        level: 2,
        matches: |line| has_marker_prefix(line, LEVEL2_MARKERS),
    },
    HeadingRule {
        name: "trailing colon",
        level: 2,
        matches: is_short_colon_line,
    },
    HeadingRule {
        name: "top-level number",
        level: 2,
        matches: is_numbered_heading,
    },
    HeadingRule {
        name: "sub-numbering",
        level: 3,
        matches: |line| SUB_NUMBERED.is_match(line),
    },
    HeadingRule {
        name: "structural marker",
        level: 3,
        matches: |line| has_marker_prefix(line, LEVEL3_MARKERS),
    },
];

/// Classify one line: heading level 1–3, or 0 for body text.
///
/// Evaluated on the trimmed text, independent of neighboring lines. Lines
/// over the length cap are always body text, whatever else they match.
pub fn classify(line: &str) -> u8 {
    let line = line.trim();

    if line.is_empty() || line.chars().count() > HEADING_LENGTH_CAP {
        return 0;
    }

    for rule in RULES {
        if (rule.matches)(line) {
            tracing::trace!(rule = rule.name, level = rule.level, "heading rule matched");
            return rule.level;
        }
    }

    0
}

/// Classify every line of `text`, preserving original indices. Blank lines
/// come through as empty level-0 entries so the assembler sees them.
pub fn classify_lines(text: &str) -> Vec<ClassifiedLine> {
    text.lines()
        .enumerate()
        .map(|(index, raw)| {
            let trimmed = raw.trim();
            ClassifiedLine {
                level: classify(trimmed),
                text: trimmed.to_string(),
                index,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Short line of nothing but uppercase letters and spaces.
///
/// Punctuation disqualifies: `SECTION:` should fall through to the
/// trailing-colon rule rather than rank as level 1.
fn is_all_caps_title(line: &str) -> bool {
    line.chars().count() < ALL_CAPS_CAP
        && line.chars().any(|c| c.is_ascii_uppercase())
        && line.chars().all(|c| c.is_ascii_uppercase() || c == ' ')
}

/// Marker token at the start of the line, on a word boundary.
fn has_marker_prefix(line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| {
        line.strip_prefix(marker)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric()))
    })
}

fn is_short_colon_line(line: &str) -> bool {
    line.ends_with(':') && line.chars().count() < COLON_CAP
}

/// `N.` for N in a bounded small range, not `N.M` (which is level 3).
fn is_numbered_heading(line: &str) -> bool {
    NUMBERED
        .captures(line)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .is_some_and(|n| (1..=MAX_HEADING_NUMBER).contains(&n))
}
