//! Gemini adapter for structured replies.
//!
//! The session talks to the model through the [`GenerateReply`] trait so
//! tests can substitute a mock. The one concrete implementation posts to
//! the Gemini `generateContent` endpoint with a JSON response MIME type and
//! an explicit request timeout; retries are deliberately not attempted.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, ChatResult};
use crate::types::ScreenshotContext;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Seam between the session and the hosted model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerateReply: Send + Sync {
    /// Send one prompt (plus optional screenshot) and return the raw reply
    /// text. The caller parses it into an [`crate::types::AssistantReply`].
    async fn generate(
        &self,
        prompt: String,
        screenshot: Option<ScreenshotContext>,
    ) -> ChatResult<String>;
}

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash-preview-04-17";

    /// Create a client. A missing or empty API key is the one fatal,
    /// unrecoverable configuration error in the system.
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> ChatResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ChatError::ApiKeyMissing);
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChatError::LlmError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model: model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            client,
        })
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env(model: Option<String>) -> ChatResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        Self::new(api_key, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerateReply for GeminiClient {
    async fn generate(
        &self,
        prompt: String,
        screenshot: Option<ScreenshotContext>,
    ) -> ChatResult<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_ENDPOINT, self.model, self.api_key
        );

        // The screenshot rides along as an inline image part before the text.
        let mut parts = Vec::new();
        if let Some(data) = screenshot.as_ref().and_then(|s| s.base64_data()) {
            parts.push(Part::inline_image(data));
        }
        parts.push(Part::text(prompt));

        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::LlmError(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::LlmError(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ChatError::LlmError(format!("Failed to parse response: {}", e)))?;

        let text: String = result
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ChatError::LlmError("No response from Gemini".to_string()));
        }
        Ok(text)
    }
}

// Gemini API request types
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_image(base64_data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "image/png".to_string(),
                data: base64_data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

// Gemini API response types
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
