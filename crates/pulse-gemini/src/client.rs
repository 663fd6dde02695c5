//! HTTP client for the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use futures::future::BoxFuture;
use pulse_core::{AppConfig, GenerateRequest, ModelCollaborator, ModelReply, UpstreamError};
use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for one Gemini model.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("social-pulse/0.1")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| GeminiError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
        })
    }

    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeminiError> {
        Self::with_base_url(
            &config.gemini_api_key,
            &config.gemini_model,
            config.request_timeout_secs,
            &config.gemini_base_url,
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one `generateContent` call and collapses the first candidate
    /// into a [`ModelReply`].
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure or timeout.
    /// - [`GeminiError::Status`] on a non-2xx status.
    /// - [`GeminiError::Deserialize`] if the body is not the expected shape.
    /// - [`GeminiError::EmptyResponse`] if no candidate text came back.
    pub async fn generate_content(
        &self,
        request: &GenerateRequest,
    ) -> Result<ModelReply, GeminiError> {
        let body = GenerateContentRequest::new(&request.prompt, request.grounding);
        tracing::debug!(
            model = %self.model,
            grounding = request.grounding,
            prompt_chars = request.prompt.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(
                model = %self.model,
                status = status.as_u16(),
                "gemini returned non-success status"
            );
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_CHARS),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        let reply = parsed.into_reply()?;
        tracing::debug!(
            model = %self.model,
            reply_chars = reply.text.len(),
            citations = reply.citations.len(),
            "generateContent reply received"
        );
        Ok(reply)
    }
}

impl ModelCollaborator for GeminiClient {
    fn generate<'a>(
        &'a self,
        request: &'a GenerateRequest,
    ) -> BoxFuture<'a, Result<ModelReply, UpstreamError>> {
        Box::pin(async move {
            self.generate_content(request)
                .await
                .map_err(|e| UpstreamError::new(e.to_string()))
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}
