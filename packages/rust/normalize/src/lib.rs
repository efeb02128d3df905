//! Deterministic spacing repair for lossy-extracted text.
//!
//! PDF text extraction routinely glues words together, drops the space
//! after punctuation, and splits words across line breaks with hyphens.
//! [`normalize`] applies an ordered chain of rewrite rules that repairs
//! those defects; [`audit`] and [`residual_issue_count`] scan text against
//! the same pattern table for reporting.
//!
//! The chain is pure and idempotent: `normalize(normalize(t)) ==
//! normalize(t)` for any input.

mod audit;
mod patterns;
mod rules;
mod words;

pub use audit::{audit, residual_issue_count};

/// Normalize spacing in `text`: split merged words, repair punctuation
/// spacing, collapse space runs, and rejoin hyphenated line breaks.
pub fn normalize(text: &str) -> String {
    let result = rules::run_chain(text);
    tracing::debug!(
        chars_in = text.len(),
        chars_out = result.len(),
        "normalization pass complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_merged_lowercase_run() {
        let result = normalize("thequickbrownfox");
        assert!(result.contains("the quick brown fox"), "got: {result}");
    }

    #[test]
    fn repairs_merged_function_words_with_remainder() {
        let result = normalize("andtheresults");
        assert!(result.contains("and the results"), "got: {result}");
    }

    #[test]
    fn repairs_missing_space_after_sentence() {
        let result = normalize("word.Another");
        assert!(result.contains("word. Another"), "got: {result}");
    }

    #[test]
    fn repairs_camel_case_merge() {
        let result = normalize("the reportSays otherwise");
        assert!(result.contains("report Says"), "got: {result}");
    }

    #[test]
    fn repairs_digit_boundaries() {
        let result = normalize("Thecompanyreported5milliondollars.However,itwas fine.");
        assert!(result.contains("The company reported 5 million dollars."), "got: {result}");
        assert!(result.contains("However, it was fine."), "got: {result}");
    }

    #[test]
    fn rejoins_hyphenated_line_wrap() {
        let result = normalize("the exam-\nple continues");
        assert!(result.contains("the example continues"), "got: {result}");
    }

    #[test]
    fn collapses_space_runs() {
        let result = normalize("spread     out      words");
        assert_eq!(result, "spread out words");
    }

    #[test]
    fn preserves_line_structure() {
        let input = "FIRST HEADING\n\nbody line one\nbody line two\n";
        let result = normalize(input);
        assert_eq!(result.lines().count(), input.lines().count());
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "thequickbrownfox jumps",
            "andtheresults were5percent",
            "word.Another sentence,here",
            "hyphen-\nated and   spaced",
            // Dehyphenation output feeds the merge tables in the same pass.
            "and-\ntheresults came late",
            "Thisline hasCamelCase and 3digits",
            "already clean text. Nothing to do here.",
            "",
        ];

        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn ordinary_vocabulary_untouched() {
        let input = "The committee considered the proposal satisfactory.";
        assert_eq!(normalize(input), input);
    }
}
