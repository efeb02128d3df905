//! Extraction coordinator: first non-blank success wins.
//!
//! Tries backends in their configured priority order via the shared
//! fallback combinator. Empty results and failures are recorded and
//! recovered locally; only full exhaustion surfaces as `NoUsableText`.
//! No retries, no merging of outputs across backends.

use std::path::Path;

use tracing::{info, instrument, warn};

use pagemend_shared::{PagemendError, Result, fallback};

use crate::backends::ExtractionBackend;

/// Marker reason distinguishing blank results from real failures inside the
/// shared attempt records.
const BLANK_REASON: &str = "returned blank text";

/// Why a backend did not produce usable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The backend ran but produced only whitespace.
    Empty,
    /// The backend errored.
    Failed(String),
}

/// Record of one unsuccessful backend attempt.
#[derive(Debug, Clone)]
pub struct ExtractionAttempt {
    /// Backend identifier.
    pub backend: String,
    /// Position in the priority order, zero-based.
    pub ordinal: usize,
    /// What went wrong.
    pub outcome: AttemptOutcome,
}

/// A successful extraction, tagged with the backend that produced it and
/// the attempts that failed before it.
#[derive(Debug)]
pub struct Extraction {
    /// The raw extracted text (non-blank).
    pub text: String,
    /// Name of the winning backend.
    pub backend: String,
    /// Backends tried and rejected before the winner.
    pub attempts: Vec<ExtractionAttempt>,
}

/// Run the backend chain against `path` and return the first non-blank
/// extraction.
///
/// A missing source is reported as `SourceNotFound` before any backend is
/// invoked; an exhausted chain is reported as `NoUsableText`.
#[instrument(skip(backends), fields(path = %path.display(), backends = backends.len()))]
pub async fn extract_text(
    path: &Path,
    backends: &[Box<dyn ExtractionBackend>],
) -> Result<Extraction> {
    if !path.is_file() {
        return Err(PagemendError::source_not_found(path));
    }

    let chain = fallback::first_success(
        backends,
        |b| b.name().to_string(),
        |b| {
            let outcome = match b.extract(path) {
                Ok(text) if text.trim().is_empty() => Err(BLANK_REASON.to_string()),
                Ok(text) => Ok(text),
                Err(e) => Err(e.to_string()),
            };
            std::future::ready(outcome)
        },
    )
    .await;

    match chain {
        Ok(win) => {
            info!(backend = %win.strategy, failed_attempts = win.failures.len(), "extraction succeeded");
            Ok(Extraction {
                text: win.value,
                backend: win.strategy,
                attempts: win.failures.iter().map(to_attempt).collect(),
            })
        }
        Err(failures) => {
            warn!(attempts = failures.len(), "all extraction backends exhausted");
            Err(PagemendError::no_usable_text(format!(
                "{} backends exhausted ({})",
                failures.len(),
                fallback::exhausted_summary(&failures)
            )))
        }
    }
}

fn to_attempt(record: &fallback::AttemptRecord) -> ExtractionAttempt {
    let outcome = if record.reason == BLANK_REASON {
        AttemptOutcome::Empty
    } else {
        AttemptOutcome::Failed(record.reason.clone())
    };
    ExtractionAttempt {
        backend: record.strategy.clone(),
        ordinal: record.ordinal,
        outcome,
    }
}
