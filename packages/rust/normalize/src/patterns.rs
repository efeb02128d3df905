//! The shared merge-detection pattern table.
//!
//! One set of compiled patterns feeds three call sites: the normalizer's
//! rewrite rules, the post-rewrite residual-issue count, and the quality
//! auditor. Keeping them here guarantees the three stay consistent.

use std::sync::LazyLock;

use regex::Regex;

/// Lowercase letter immediately followed by an uppercase letter.
pub(crate) static LOWER_THEN_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));

/// Alphabetic character immediately followed by a digit.
pub(crate) static LETTER_THEN_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z])([0-9])").expect("valid regex"));

/// Digit immediately followed by an alphabetic character.
pub(crate) static DIGIT_THEN_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9])([A-Za-z])").expect("valid regex"));

/// Sentence-ending punctuation glued to an uppercase letter.
pub(crate) static SENTENCE_THEN_CAPITAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])([A-Z])").expect("valid regex"));

/// Clause punctuation glued to a letter.
pub(crate) static CLAUSE_THEN_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,;:])([A-Za-z])").expect("valid regex"));

/// Two or more consecutive spaces (collapse target).
pub(crate) static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Three or more consecutive spaces (audit threshold).
pub(crate) static EXCESS_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {3,}").expect("valid regex"));

/// A word split across a line break by a trailing hyphen, lowercase on both
/// sides of the break.
pub(crate) static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])-\n([a-z])").expect("valid regex"));

/// Fifty or more word characters with no separator (likely merged run).
pub(crate) static LONG_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_]{50,}").expect("valid regex"));

/// Three or more consecutive symbols outside normal prose punctuation.
pub(crate) static SYMBOL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\w\s.,!?;:()'"-]{3,}"#).expect("valid regex"));

/// Count matches of the merged-word patterns in `text`. This is the number
/// the post-normalization pass reports as residual issues.
pub(crate) fn merged_boundary_count(text: &str) -> usize {
    LOWER_THEN_UPPER.find_iter(text).count()
        + LETTER_THEN_DIGIT.find_iter(text).count()
        + DIGIT_THEN_LETTER.find_iter(text).count()
        + SENTENCE_THEN_CAPITAL.find_iter(text).count()
}
