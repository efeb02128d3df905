//! Running conversion statistics, persisted as JSON.
//!
//! Loaded-or-defaulted at startup and saved after each recorded
//! conversion. A corrupt or missing stats file is never fatal: stats are
//! bookkeeping, not pipeline state.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pagemend_shared::{PagemendError, Result};

/// Aggregate counters across all conversions on this machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_conversions: u64,
    pub successful_conversions: u64,
    pub failed_conversions: u64,
    /// Total blocks written across successful conversions.
    pub total_blocks_written: u64,
    /// Rolling average duration of successful conversions, in seconds.
    pub average_duration_secs: f64,
    /// Winning extraction backend → use count.
    #[serde(default)]
    pub backends_used: BTreeMap<String, u64>,
    /// Answering rewrite model → use count.
    #[serde(default)]
    pub models_used: BTreeMap<String, u64>,
    /// Timestamp of the most recent recorded conversion.
    #[serde(default)]
    pub last_conversion: Option<DateTime<Utc>>,
}

/// One finished conversion, as fed into [`ConversionStats::record`].
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    pub success: bool,
    pub blocks: u64,
    pub duration_secs: f64,
    /// Winning backend, when extraction succeeded.
    pub backend: Option<String>,
    /// Answering rewrite model, when one did.
    pub model: Option<String>,
}

impl ConversionStats {
    /// Load stats from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(stats) => stats,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "stats file corrupt, starting fresh");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "no stats file, starting fresh");
                Self::default()
            }
        }
    }

    /// Persist stats to `path` (pretty-printed JSON).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PagemendError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PagemendError::validation(format!("stats serialization: {e}")))?;
        std::fs::write(path, json).map_err(|e| PagemendError::io(path, e))?;
        Ok(())
    }

    /// Fold one finished conversion into the counters.
    pub fn record(&mut self, conversion: &RecordedConversion) {
        self.total_conversions += 1;

        if conversion.success {
            self.successful_conversions += 1;
            self.total_blocks_written += conversion.blocks;

            // Rolling average over successful conversions only.
            let n = self.successful_conversions as f64;
            self.average_duration_secs =
                (self.average_duration_secs * (n - 1.0) + conversion.duration_secs) / n;
        } else {
            self.failed_conversions += 1;
        }

        if let Some(backend) = &conversion.backend {
            *self.backends_used.entry(backend.clone()).or_insert(0) += 1;
        }
        if let Some(model) = &conversion.model {
            *self.models_used.entry(model.clone()).or_insert(0) += 1;
        }

        self.last_conversion = Some(Utc::now());
    }

    /// Success rate as a percentage of all conversions.
    pub fn success_rate(&self) -> f64 {
        if self.total_conversions == 0 {
            return 0.0;
        }
        self.successful_conversions as f64 / self.total_conversions as f64 * 100.0
    }

    /// Human-readable multi-line summary for the CLI.
    pub fn render_summary(&self) -> String {
        let top_backend = top_entry(&self.backends_used);
        let top_model = top_entry(&self.models_used);

        format!(
            "Conversions: {} total, {} successful ({:.1}%), {} failed\n\
             Blocks written: {}\n\
             Average duration: {:.1}s\n\
             Most used backend: {}\n\
             Most used model: {}",
            self.total_conversions,
            self.successful_conversions,
            self.success_rate(),
            self.failed_conversions,
            self.total_blocks_written,
            self.average_duration_secs,
            top_backend,
            top_model,
        )
    }
}

fn top_entry(counts: &BTreeMap<String, u64>) -> String {
    counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| "none".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_stats_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("pagemend-stats-test-{}", uuid::Uuid::now_v7()))
            .join("stats.json")
    }

    fn successful(backend: &str, model: Option<&str>, secs: f64) -> RecordedConversion {
        RecordedConversion {
            success: true,
            blocks: 10,
            duration_secs: secs,
            backend: Some(backend.into()),
            model: model.map(Into::into),
        }
    }

    #[test]
    fn record_updates_counts_and_average() {
        let mut stats = ConversionStats::default();
        stats.record(&successful("pdfium", Some("gemini-1.5-flash"), 2.0));
        stats.record(&successful("pdfium", None, 4.0));
        stats.record(&RecordedConversion {
            success: false,
            blocks: 0,
            duration_secs: 0.5,
            backend: None,
            model: None,
        });

        assert_eq!(stats.total_conversions, 3);
        assert_eq!(stats.successful_conversions, 2);
        assert_eq!(stats.failed_conversions, 1);
        assert_eq!(stats.total_blocks_written, 20);
        assert!((stats.average_duration_secs - 3.0).abs() < 1e-9);
        assert_eq!(stats.backends_used["pdfium"], 2);
        assert_eq!(stats.models_used["gemini-1.5-flash"], 1);
        assert!(stats.last_conversion.is_some());
    }

    #[test]
    fn success_rate_handles_empty_stats() {
        assert_eq!(ConversionStats::default().success_rate(), 0.0);
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let path = temp_stats_path();
        let mut stats = ConversionStats::default();
        stats.record(&successful("lopdf", None, 1.0));
        stats.save(&path).unwrap();

        let reloaded = ConversionStats::load_or_default(&path);
        assert_eq!(reloaded.total_conversions, 1);
        assert_eq!(reloaded.backends_used["lopdf"], 1);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_stats_file_starts_fresh() {
        let path = temp_stats_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json at all").unwrap();

        let stats = ConversionStats::load_or_default(&path);
        assert_eq!(stats.total_conversions, 0);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn summary_names_top_backend() {
        let mut stats = ConversionStats::default();
        stats.record(&successful("pdfium", None, 1.0));
        stats.record(&successful("pdf-extract", None, 1.0));
        stats.record(&successful("pdfium", None, 1.0));

        let summary = stats.render_summary();
        assert!(summary.contains("Most used backend: pdfium"));
    }
}
