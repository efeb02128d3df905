//! Application configuration for pagemend.
//!
//! User config lives at `~/.pagemend/pagemend.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PagemendError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "pagemend.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".pagemend";

/// File name for persisted conversion statistics.
const STATS_FILE_NAME: &str = "stats.json";

// ---------------------------------------------------------------------------
// Config structs (matching pagemend.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Rewrite service settings.
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output directory for converted documents.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Extraction backends in priority order (richest first).
    #[serde(default = "default_backend_order")]
    pub backend_order: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            backend_order: default_backend_order(),
        }
    }
}

fn default_output_dir() -> String {
    ".".into()
}

fn default_backend_order() -> Vec<String> {
    vec!["pdfium".into(), "pdf-extract".into(), "lopdf".into()]
}

/// `[rewrite]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base endpoint of the generative rewrite service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Models in fallback order; the first that answers wins.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Per-request timeout in seconds. Timeout counts as a normal
    /// chain-advancing failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            endpoint: default_endpoint(),
            models: default_models(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".into()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.0-flash-exp".into(),
        "gemini-1.5-flash".into(),
        "gemini-1.5-pro".into(),
        "gemini-pro".into(),
    ]
}

fn default_timeout_secs() -> u64 {
    60
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.pagemend/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PagemendError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.pagemend/pagemend.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the path to the persisted stats file (`~/.pagemend/stats.json`).
pub fn stats_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(STATS_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PagemendError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| PagemendError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PagemendError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PagemendError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PagemendError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the rewrite API key from the configured env var, if set and non-empty.
pub fn rewrite_api_key(config: &AppConfig) -> Option<String> {
    std::env::var(&config.rewrite.api_key_env)
        .ok()
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("backend_order"));
        assert!(toml_str.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.backend_order.len(), 3);
        assert_eq!(parsed.rewrite.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn backend_order_default_is_richest_first() {
        let config = AppConfig::default();
        assert_eq!(
            config.defaults.backend_order,
            vec!["pdfium", "pdf-extract", "lopdf"]
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[rewrite]
models = ["gemini-1.5-flash"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.rewrite.models, vec!["gemini-1.5-flash"]);
        assert_eq!(config.rewrite.timeout_secs, 60);
        assert_eq!(config.defaults.backend_order.len(), 3);
    }

    #[test]
    fn api_key_absent_yields_none() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.rewrite.api_key_env = "PM_TEST_NONEXISTENT_KEY_12345".into();
        assert!(rewrite_api_key(&config).is_none());
    }
}
