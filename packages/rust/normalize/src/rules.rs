//! The spacing-repair rule chain.
//!
//! Each rule is a function `&str -> String` applied in sequence over the
//! whole text; later rules see the output of earlier ones. The chain is
//! idempotent: running it on its own output changes nothing.

use crate::patterns;
use crate::words;

/// Run the full normalization chain on raw extracted text.
///
/// Dehyphenation goes first so a word rejoined across a line break flows
/// through the merge tables in the same pass; space-collapsing goes last
/// because every other rule may insert spaces.
pub(crate) fn run_chain(text: &str) -> String {
    let mut result = text.replace("\r\n", "\n");

    result = rejoin_hyphenated(&result);
    result = split_merged_case(&result);
    result = split_letter_digit(&result);
    result = split_merged_words(&result);
    result = space_after_punctuation(&result);
    result = collapse_spaces(&result);

    result
}

// ---------------------------------------------------------------------------
// Rule 1: lowercase / uppercase boundary
// ---------------------------------------------------------------------------

/// Insert a space between a lowercase letter and a following uppercase
/// letter. Splits genuine camel-case tokens too; that cost is accepted.
fn split_merged_case(text: &str) -> String {
    patterns::LOWER_THEN_UPPER
        .replace_all(text, "$1 $2")
        .to_string()
}

// ---------------------------------------------------------------------------
// Rule 2: letter / digit boundary, both directions
// ---------------------------------------------------------------------------

fn split_letter_digit(text: &str) -> String {
    let pass = patterns::LETTER_THEN_DIGIT.replace_all(text, "$1 $2");
    patterns::DIGIT_THEN_LETTER
        .replace_all(&pass, "$1 $2")
        .to_string()
}

// ---------------------------------------------------------------------------
// Rule 3: merged function words
// ---------------------------------------------------------------------------

/// Rewrite alphabetic tokens through the merged-word tables: direct pair
/// replacements first, then dictionary segmentation for longer runs.
fn split_merged_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut token = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            token.push(ch);
        } else {
            flush_token(&mut out, &token);
            token.clear();
            out.push(ch);
        }
    }
    flush_token(&mut out, &token);

    out
}

fn flush_token(out: &mut String, token: &str) {
    if token.is_empty() {
        return;
    }
    rewrite_token(out, token);
}

fn rewrite_token(out: &mut String, token: &str) {
    // Interior capitals were already handled by the camel-case rule.
    let tail_is_lower = token.chars().skip(1).all(|c| c.is_ascii_lowercase());
    if !tail_is_lower {
        out.push_str(token);
        return;
    }

    let lower = token.to_ascii_lowercase();

    if let Some(replacement) = words::pair_replacement(&lower) {
        push_matching_case(out, token, replacement);
        return;
    }

    if lower.len() >= words::MIN_SEGMENT_LEN && !words::is_known_word(&lower) {
        if let Some(parts) = words::segment(&lower) {
            push_matching_case(out, token, &parts.join(" "));
            return;
        }
    }

    out.push_str(token);
}

/// Append `replacement`, capitalizing its first letter when the original
/// token was capitalized.
fn push_matching_case(out: &mut String, token: &str, replacement: &str) {
    let capitalize = token.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if !capitalize {
        out.push_str(replacement);
        return;
    }

    let mut chars = replacement.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.push_str(chars.as_str());
    }
}

// ---------------------------------------------------------------------------
// Rule 4: punctuation spacing
// ---------------------------------------------------------------------------

/// Space after sentence-ending punctuation before a capital, and after
/// clause punctuation before any letter.
fn space_after_punctuation(text: &str) -> String {
    let pass = patterns::SENTENCE_THEN_CAPITAL.replace_all(text, "$1 $2");
    patterns::CLAUSE_THEN_LETTER
        .replace_all(&pass, "$1 $2")
        .to_string()
}

// ---------------------------------------------------------------------------
// Rule 5: collapse space runs
// ---------------------------------------------------------------------------

fn collapse_spaces(text: &str) -> String {
    patterns::MULTI_SPACE.replace_all(text, " ").to_string()
}

// ---------------------------------------------------------------------------
// Rule 6: dehyphenation across line breaks
// ---------------------------------------------------------------------------

/// Rejoin a word split across a line break by a trailing hyphen when both
/// sides are lowercase letters.
fn rejoin_hyphenated(text: &str) -> String {
    patterns::HYPHEN_BREAK.replace_all(text, "$1$2").to_string()
}
