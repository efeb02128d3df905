//! Generative rewrite client with model fallback.
//!
//! Sends normalized text to a Generative Language endpoint for cleanup,
//! trying each configured model in order via the shared first-success
//! combinator. Timeouts, HTTP errors, and malformed responses are all
//! normal chain-advancing failures. When every model fails the client
//! degrades gracefully: the input text is returned unchanged and the
//! pipeline continues.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use pagemend_shared::{AttemptRecord, PagemendError, Result, RewriteConfig, fallback};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a rewrite call. Never an error: an exhausted model chain
/// yields the input text back with `degraded` set.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// Rewritten text, or the unchanged input when degraded.
    pub text: String,
    /// The model that answered, when one did.
    pub model: Option<String>,
    /// True when every configured model failed and the input passed
    /// through unchanged.
    pub degraded: bool,
    /// Records of model attempts that failed.
    pub failures: Vec<AttemptRecord>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the rewrite service, configured with an ordered model
/// fallback list.
pub struct RewriteClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    models: Vec<String>,
}

impl RewriteClient {
    /// Build a client from config. The API key comes from the environment
    /// (resolved by the caller); it is never persisted.
    pub fn new(config: &RewriteConfig, api_key: String) -> Result<Self> {
        if config.models.is_empty() {
            return Err(PagemendError::config("rewrite model list is empty"));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("pagemend/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PagemendError::Rewrite(format!("client build: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            models: config.models.clone(),
        })
    }

    /// The configured model fallback order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Rewrite `text`, falling back through the model list. On exhaustion
    /// the input is returned unchanged with `degraded = true`.
    #[instrument(skip_all, fields(chars = text.len(), models = self.models.len()))]
    pub async fn rewrite(&self, text: &str) -> RewriteOutcome {
        let chain = fallback::first_success(
            &self.models,
            |m| m.clone(),
            |model| {
                let http = self.http.clone();
                let url = format!("{}/models/{}:generateContent", self.endpoint, model);
                let api_key = self.api_key.clone();
                let body = GenerateRequest {
                    contents: vec![RequestContent {
                        parts: vec![RequestPart {
                            text: build_prompt(text),
                        }],
                    }],
                };
                async move { request_model(&http, &url, &api_key, &body).await }
            },
        )
        .await;

        match chain {
            Ok(win) => {
                info!(model = %win.strategy, "rewrite succeeded");
                RewriteOutcome {
                    text: win.value,
                    model: Some(win.strategy),
                    degraded: false,
                    failures: win.failures,
                }
            }
            Err(failures) => {
                warn!(
                    summary = %fallback::exhausted_summary(&failures),
                    "all rewrite models failed, passing text through unchanged"
                );
                RewriteOutcome {
                    text: text.to_string(),
                    model: None,
                    degraded: true,
                    failures,
                }
            }
        }
    }
}

async fn request_model(
    http: &reqwest::Client,
    url: &str,
    api_key: &str,
    body: &GenerateRequest,
) -> std::result::Result<String, String> {
    let response = http
        .post(url)
        .header("x-goog-api-key", api_key)
        .json(body)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {status}"));
    }

    let parsed: GenerateResponse = response
        .json()
        .await
        .map_err(|e| format!("malformed response: {e}"))?;

    response_text(parsed)
}

/// Pull the rewritten text out of a parsed response.
fn response_text(response: GenerateResponse) -> std::result::Result<String, String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| "no candidates in response".to_string())?;

    let content = candidate
        .content
        .ok_or_else(|| "candidate has no content".to_string())?;

    let text: String = content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err("empty rewrite response".to_string());
    }

    Ok(text)
}

/// Cleanup instructions sent with every rewrite request.
fn build_prompt(text: &str) -> String {
    format!(
        "Clean up this text extracted from a document. Strictly follow these rules:\n\
         1. Fix OCR errors and garbled fragments.\n\
         2. Preserve the original paragraph and line structure.\n\
         3. Do not add extra spaces between words.\n\
         4. Keep the original meaning and content order.\n\
         5. Remove only obvious extraction artifacts such as stray mid-sentence line breaks.\n\
         6. Do not add titles, headers, or commentary of your own.\n\
         7. Return only the cleaned text.\n\
         \n\
         Text to clean:\n{text}"
    )
}
