//! Quality audit over repaired text.
//!
//! Stateless scan counting residual defects from the shared pattern table.
//! Advisory only: the audit never mutates text and never blocks the
//! pipeline; its output feeds the optional diagnostics sink.

use crate::patterns;

/// Scan `text` for residual extraction defects and describe each class of
/// issue found. An empty result means the scan found nothing suspicious.
pub fn audit(text: &str) -> Vec<String> {
    let mut issues = Vec::new();

    let merged = patterns::merged_boundary_count(text);
    if merged > 0 {
        issues.push(format!("{merged} potential merged-word boundaries"));
    }

    let excess = patterns::EXCESS_SPACE.find_iter(text).count();
    if excess > 0 {
        issues.push(format!("{excess} runs of excessive spacing"));
    }

    let long_words = patterns::LONG_WORD.find_iter(text).count();
    if long_words > 0 {
        issues.push(format!("{long_words} suspiciously long unbroken words"));
    }

    let symbol_runs = patterns::SYMBOL_RUN.find_iter(text).count();
    if symbol_runs > 0 {
        issues.push(format!("{symbol_runs} runs of garbled punctuation"));
    }

    issues
}

/// The residual-issue count reported by the post-normalization pass:
/// merged-word boundaries plus excessive-space runs still present after
/// repair. Uses the same patterns the rewrite rules match on.
pub fn residual_issue_count(text: &str) -> usize {
    patterns::merged_boundary_count(text) + patterns::EXCESS_SPACE.find_iter(text).count()
}
