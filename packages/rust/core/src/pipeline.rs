//! End-to-end conversion pipeline: source → extract → normalize → rewrite
//! → normalize → classify → assemble → write.
//!
//! Stages are strictly sequential; each stage's output is the next stage's
//! sole input. Rewrite failure degrades gracefully to the pre-rewrite
//! text. Writing is fatal: no partial documents are ever reported as
//! success.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use pagemend_extract::{ExtractionAttempt, ExtractionBackend};
use pagemend_rewrite::RewriteClient;
use pagemend_shared::{Block, BlockCounts, JobId, Result};
use pagemend_writer::DocumentSink;

use crate::assemble::assemble;
use crate::classify::classify_lines;

/// One conversion request: where to read and where to write.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// Source document path.
    pub input: PathBuf,
    /// Output document path handed to the sink.
    pub output: PathBuf,
}

/// Result of a completed conversion.
#[derive(Debug)]
pub struct ConvertOutcome {
    /// Identifier for this conversion request.
    pub job_id: JobId,
    /// Where the document was written.
    pub output_path: PathBuf,
    /// Winning extraction backend.
    pub backend: String,
    /// Backends that failed before the winner.
    pub extraction_attempts: Vec<ExtractionAttempt>,
    /// SHA-256 of the raw extracted text.
    pub content_hash: String,
    /// Model that answered the rewrite, when one did.
    pub rewrite_model: Option<String>,
    /// True when a rewrite client was configured but every model failed.
    pub rewrite_degraded: bool,
    /// Audit issues in the raw extracted text.
    pub raw_issues: Vec<String>,
    /// Audit issues remaining in the final text.
    pub final_issues: Vec<String>,
    /// Residual merge/spacing pattern count after the post-pass.
    pub residual_issues: usize,
    /// The assembled document.
    pub blocks: Vec<Block>,
    /// Block counts, for reporting.
    pub counts: BlockCounts,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline phases.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
}

/// Snapshot handed to the optional diagnostics sink after a conversion.
#[derive(Debug)]
pub struct ConversionDiagnostics<'a> {
    pub job_id: &'a JobId,
    pub backend: &'a str,
    pub issues: &'a [String],
    pub counts: BlockCounts,
    pub rewrite_model: Option<&'a str>,
    pub elapsed: Duration,
}

/// Optional collaborator receiving conversion outcomes for reporting.
/// The pipeline behaves identically whether or not a sink is present.
pub trait DiagnosticsSink: Send + Sync {
    fn conversion_finished(&self, diagnostics: &ConversionDiagnostics<'_>);
}

/// Run one conversion end to end.
///
/// `backends` is the resolved extraction priority order; `rewrite` is the
/// optional rewrite client (absent = rewrite skipped); `sink` receives the
/// assembled blocks.
#[instrument(skip_all, fields(input = %request.input.display(), output = %request.output.display()))]
pub async fn convert(
    request: &ConvertRequest,
    backends: &[Box<dyn ExtractionBackend>],
    rewrite: Option<&RewriteClient>,
    sink: &dyn DocumentSink,
    progress: &dyn ProgressReporter,
    diagnostics: Option<&dyn DiagnosticsSink>,
) -> Result<ConvertOutcome> {
    let start = Instant::now();
    let job_id = JobId::new();

    info!(%job_id, "starting conversion");

    // --- Phase 1: Extraction ---
    progress.phase("Extracting text");
    let extraction = pagemend_extract::extract_text(&request.input, backends).await?;

    let content_hash = {
        let mut hasher = Sha256::new();
        hasher.update(extraction.text.as_bytes());
        format!("{:x}", hasher.finalize())
    };

    let raw_issues = pagemend_normalize::audit(&extraction.text);
    if !raw_issues.is_empty() {
        info!(count = raw_issues.len(), "raw extraction has quality issues");
    }

    // --- Phase 2: Pre-rewrite normalization ---
    progress.phase("Repairing spacing");
    let normalized = pagemend_normalize::normalize(&extraction.text);

    // --- Phase 3: Generative rewrite (graceful) ---
    let (rewritten, rewrite_model, rewrite_degraded) = match rewrite {
        Some(client) => {
            progress.phase("Rewriting text");
            let outcome = client.rewrite(&normalized).await;
            if outcome.degraded {
                warn!("rewrite degraded, continuing with normalized text");
            }
            (outcome.text, outcome.model, outcome.degraded)
        }
        None => (normalized, None, false),
    };

    // --- Phase 4: Post-rewrite normalization + residual count ---
    progress.phase("Validating spacing");
    let final_text = pagemend_normalize::normalize(&rewritten);
    let residual_issues = pagemend_normalize::residual_issue_count(&final_text);
    let final_issues = pagemend_normalize::audit(&final_text);

    // --- Phase 5: Classification + assembly ---
    progress.phase("Reconstructing structure");
    let lines = classify_lines(&final_text);
    let blocks = assemble(&lines);
    let counts = BlockCounts::tally(&blocks);

    // --- Phase 6: Writing ---
    progress.phase("Writing document");
    sink.write(&blocks, &request.output)?;

    let elapsed = start.elapsed();

    if let Some(sink) = diagnostics {
        sink.conversion_finished(&ConversionDiagnostics {
            job_id: &job_id,
            backend: &extraction.backend,
            issues: &final_issues,
            counts,
            rewrite_model: rewrite_model.as_deref(),
            elapsed,
        });
    }

    info!(
        %job_id,
        backend = %extraction.backend,
        headings = counts.headings,
        paragraphs = counts.paragraphs,
        residual_issues,
        elapsed_ms = elapsed.as_millis(),
        "conversion complete"
    );

    Ok(ConvertOutcome {
        job_id,
        output_path: request.output.clone(),
        backend: extraction.backend,
        extraction_attempts: extraction.attempts,
        content_hash,
        rewrite_model,
        rewrite_degraded,
        raw_issues,
        final_issues,
        residual_issues,
        blocks,
        counts,
        elapsed,
    })
}
