//! Wish service adapter: one call to an external text generator with fixed
//! fallbacks.
//!
//! Without a credential the adapter answers immediately with a fixed
//! blessing and never touches the network. With one, it issues a single
//! request and swaps any failure for a second fixed blessing. No retries.

use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tree_core::Mode;

pub const WISH_PROMPT: &str = "Write a very short, poetic, luxurious, and elegant Christmas blessing (max 20 words). Use words like 'Gold', 'Light', 'Timeless', 'Opulence'.";
pub const WISH_TEMPERATURE: f32 = 0.9;

/// Returned when no credential is configured.
pub const FALLBACK_UNCONFIGURED: &str =
    "May your holidays be filled with golden moments and emerald dreams.";
/// Returned when the service call fails.
pub const FALLBACK_FAILED: &str = "A timeless glow upon your festive season.";

pub const LOADING_TEXT: &str = "Consulting the spirits of luxury...";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_MODEL: &str = "WISH_MODEL";
pub const ENV_ENDPOINT: &str = "WISH_ENDPOINT";

#[derive(Debug, Error)]
pub enum WishError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service answered with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response contained no text")]
    EmptyResponse,
    #[error("http client unavailable")]
    ClientUnavailable,
}

/// What gets sent to the generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WishRequest<'a> {
    pub prompt: &'a str,
    pub temperature: f32,
}

impl Default for WishRequest<'static> {
    fn default() -> Self {
        Self {
            prompt: WISH_PROMPT,
            temperature: WISH_TEMPERATURE,
        }
    }
}

/// External text generator.
pub trait WishBackend: Send + Sync {
    fn generate(&self, api_key: &str, request: &WishRequest<'_>) -> Result<String, WishError>;
}

/// Environment-derived settings for the wish service.
#[derive(Clone, Debug, PartialEq)]
pub struct WishConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl WishConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            api_key: get(ENV_API_KEY),
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: get(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

// ---------------- Gemini REST wire format ----------------

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug, Default)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, trimmed.
    pub fn text(&self) -> Result<String, WishError> {
        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(WishError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }
}

/// Parse a raw response body.
pub fn parse_response(body: &str) -> Result<String, WishError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    response.text()
}

/// Google Generative Language backend over a blocking HTTP client.
///
/// The client is only built when a credential is configured. Requests have
/// no timeout; an unresponsive service keeps the wish loading.
pub struct GeminiBackend {
    client: Option<reqwest::blocking::Client>,
    url: String,
}

impl GeminiBackend {
    pub fn new(config: &WishConfig) -> Self {
        let client = match config.api_key {
            Some(_) => match build_client() {
                Ok(client) => Some(client),
                Err(e) => {
                    log::error!("[wish] http client unavailable: {e}");
                    None
                }
            },
            None => None,
        };
        Self {
            client,
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }
}

fn build_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("tree-app/", env!("CARGO_PKG_VERSION")))
        .timeout(None::<Duration>)
        .build()
}

impl WishBackend for GeminiBackend {
    fn generate(&self, api_key: &str, request: &WishRequest<'_>) -> Result<String, WishError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };
        let client = self.client.as_ref().ok_or(WishError::ClientUnavailable)?;
        let response = client
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(WishError::Status(status.as_u16()));
        }
        parse_response(&response.text()?)
    }
}

/// The adapter itself.
pub struct WishService<B> {
    api_key: Option<String>,
    backend: B,
}

impl WishService<GeminiBackend> {
    pub fn from_env() -> Self {
        let config = WishConfig::from_env();
        if config.api_key.is_none() {
            log::warn!("[wish] {ENV_API_KEY} not set; wishes use the fixed blessing");
        }
        let backend = GeminiBackend::new(&config);
        Self::new(config.api_key, backend)
    }
}

impl<B: WishBackend> WishService<B> {
    pub fn new(api_key: Option<String>, backend: B) -> Self {
        Self { api_key, backend }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Produce a wish; never fails, falls back to fixed text instead.
    pub fn generate_wish(&self) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return FALLBACK_UNCONFIGURED.to_string();
        };
        match self.backend.generate(api_key, &WishRequest::default()) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    log::error!("[wish] generation failed: {}", WishError::EmptyResponse);
                    return FALLBACK_FAILED.to_string();
                }
                text.to_string()
            }
            Err(e) => {
                log::error!("[wish] generation failed: {e}");
                FALLBACK_FAILED.to_string()
            }
        }
    }
}

/// A wish being generated on a worker thread.
pub struct PendingWish {
    rx: mpsc::Receiver<String>,
}

impl PendingWish {
    pub fn spawn<B: WishBackend + 'static>(service: Arc<WishService<B>>) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("wish".into())
            .spawn(move || {
                let text = service.generate_wish();
                _ = tx.send(text);
            })?;
        Ok(Self { rx })
    }

    /// Resolved text, if the worker has finished.
    pub fn poll(&self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(text) => Some(text),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(FALLBACK_FAILED.to_string()),
        }
    }
}

/// UI-side wish state: loading gating plus the last resolved text.
#[derive(Default)]
pub struct WishDesk {
    pending: Option<PendingWish>,
    text: Option<String>,
}

impl WishDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Start a wish if allowed: only while assembled and nothing is in flight.
    pub fn request<B: WishBackend + 'static>(&mut self, mode: Mode, service: &Arc<WishService<B>>) -> bool {
        if mode != Mode::Assembled || self.is_loading() {
            return false;
        }
        match PendingWish::spawn(Arc::clone(service)) {
            Ok(pending) => {
                self.text = None;
                self.pending = Some(pending);
                log::info!("[wish] requested");
                true
            }
            Err(e) => {
                log::error!("[wish] could not start worker: {e}");
                false
            }
        }
    }

    /// Pick up a finished wish; returns true when the text changed.
    pub fn poll(&mut self) -> bool {
        let Some(text) = self.pending.as_ref().and_then(PendingWish::poll) else {
            return false;
        };
        log::info!("[wish] \"{text}\"");
        self.pending = None;
        self.text = Some(text);
        true
    }

    /// Line shown to the user for the current state.
    pub fn status_line(&self) -> Option<String> {
        if self.is_loading() {
            return Some(LOADING_TEXT.to_string());
        }
        self.text.as_ref().map(|t| format!("\"{t}\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  Golden light, "},{"text":"timeless. \n"}]}}]}"#;
        assert_eq!(parse_response(body).ok().as_deref(), Some("Golden light, timeless."));
    }

    #[test]
    fn empty_candidates_are_an_error() {
        assert!(matches!(parse_response(r#"{"candidates":[]}"#), Err(WishError::EmptyResponse)));
        assert!(matches!(parse_response("not json"), Err(WishError::Malformed(_))));
    }

    #[test]
    fn blank_env_values_count_as_unset() {
        let cfg = WishConfig::from_lookup(|name| match name {
            ENV_API_KEY => Some("   ".to_string()),
            ENV_MODEL => Some("custom-model".to_string()),
            _ => None,
        });
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.model, "custom-model");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn backend_without_credential_builds_no_client() {
        let cfg = WishConfig::from_lookup(|_| None);
        let backend = GeminiBackend::new(&cfg);
        assert!(!backend.is_ready());
        assert!(matches!(
            backend.generate("k", &WishRequest::default()),
            Err(WishError::ClientUnavailable)
        ));
    }

    #[test]
    fn backend_with_credential_builds_client() {
        let cfg = WishConfig::from_lookup(|name| (name == ENV_API_KEY).then(|| "k".to_string()));
        let backend = GeminiBackend::new(&cfg);
        assert!(backend.is_ready());
        assert_eq!(
            backend.url,
            format!("{DEFAULT_ENDPOINT}/models/{DEFAULT_MODEL}:generateContent")
        );
    }

    #[test]
    fn request_body_uses_camel_case_config() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi" }],
            }],
            generation_config: GenerationConfig { temperature: 0.9 },
        };
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap_or_default() - 0.9).abs() < 1e-6);
    }
}
