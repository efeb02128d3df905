//! Shared types, error model, and configuration for pagemend.
//!
//! This crate is the foundation depended on by all other pagemend crates.
//! It provides:
//! - [`PagemendError`] — the unified error type
//! - Domain types ([`Block`], [`ClassifiedLine`], [`JobId`])
//! - Configuration ([`AppConfig`], config loading)
//! - The generic first-success [`fallback`] combinator used by both the
//!   extraction and rewrite chains

pub mod config;
pub mod error;
pub mod fallback;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, RewriteConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, rewrite_api_key, stats_file_path,
};
pub use error::{PagemendError, Result};
pub use fallback::{AttemptRecord, ChainWin, exhausted_summary, first_success};
pub use types::{Block, BlockCounts, ClassifiedLine, HEADING_LENGTH_CAP, JobId};
