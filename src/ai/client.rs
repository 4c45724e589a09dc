//! Text-completion client boundary.
//!
//! The collaborator is any service that turns a prompt into text; the
//! `TextCompletion` trait keeps the rest of the crate mockable. The concrete
//! client targets the Gemini `generateContent` endpoint and scrapes the
//! first candidate's text part, matching the service the shipped app used.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::fmt::Write as _;
use std::time::Duration;

use serde_json::{Value, json};

use crate::geometry::Widget;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

/// Errors produced by collaborator client operations.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the collaborator failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The collaborator returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The collaborator response carried no text candidate.
    #[error("API response contained no text")]
    EmptyResponse,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Provider-neutral async trait for text completion. Enables mocking in tests.
#[async_trait::async_trait]
pub trait TextCompletion: Send + Sync {
    /// Send `prompt` to the collaborator and return its raw text reply.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] if the request fails or the response carries
    /// no usable text.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Typed client configuration parsed from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl GeminiConfig {
    /// Build client config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional:
    /// - `GEMINI_MODEL`: default `gemini-1.5-flash`
    /// - `AI_REQUEST_TIMEOUT_SECS`: default 60
    /// - `AI_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`AiError::MissingApiKey`] when the key is absent.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AiError::MissingApiKey { var: "GEMINI_API_KEY".into() })?;
        Ok(Self {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into()),
            request_timeout_secs: env_parse("AI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: env_parse("AI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// HTTP client for the Gemini text-generation endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] when the HTTP client fails to build.
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] when the key is absent or the client fails to
    /// build.
    pub fn from_env() -> Result<Self, AiError> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait::async_trait]
impl TextCompletion for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{GEMINI_BASE_URL}/models/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.2, "maxOutputTokens": 4096 },
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::ApiRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::ApiResponse { status: status.as_u16(), body });
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| AiError::ApiRequest(e.to_string()))?;
        extract_candidate_text(&parsed).ok_or(AiError::EmptyResponse)
    }
}

/// Scrape `candidates[0].content.parts[0].text` from a generation response.
#[must_use]
pub(crate) fn extract_candidate_text(response: &Value) -> Option<String> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(ToString::to_string)
}

/// Serialize the current dashboard plus the user's instruction into the
/// conversational prompt. `history` holds recent `(role, content)` turns.
#[must_use]
pub fn build_chat_prompt(
    instruction: &str,
    widgets: &[Widget],
    history: &[(String, String)],
) -> String {
    let summary = widget_summary(widgets);
    let mut prompt = format!(
        "You are a dashboard assistant helping users modify widgets.\n\n\
         CURRENT DASHBOARD ({} widgets):\n{}\n\n\
         USER REQUEST: \"{instruction}\"\n\n\
         Respond with ONLY valid JSON: {{\"message\": \"...\", \"actions\": [...]}}.\n\
         Action types: add (widgets list), modify (widgetId, data), \
         delete (widgetId or widgetType), update_value (widgetId, field, value).\n\
         Widget types: kpi, bar, line, trend, pie, table, text.\n\
         No markdown, no code blocks, no extra text.",
        widgets.len(),
        if summary.is_empty() { "Empty dashboard".to_string() } else { summary },
    );

    if !history.is_empty() {
        prompt.push_str("\n\nRECENT CONVERSATION:\n");
        for (role, content) in history.iter().rev().take(3).rev() {
            let _ = writeln!(prompt, "{role}: {content}");
        }
    }
    prompt
}

/// One line per widget: ordinal, kind, title, and id.
fn widget_summary(widgets: &[Widget]) -> String {
    use crate::binding::WidgetPayload;
    widgets
        .iter()
        .enumerate()
        .map(|(idx, w)| {
            let title = WidgetPayload::hydrate(w.kind, &w.data).title().to_string();
            format!("{}. {} - \"{title}\" (ID: {})", idx + 1, w.kind.as_str(), w.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
