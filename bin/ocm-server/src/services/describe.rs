//! Description drafting through a generative text service.
//!
//! [`DescriptionGenerator`] reports typed failures; choosing what text to
//! show instead is the caller's job (see `routes::admin::describe`).

use async_trait::async_trait;
use ocm_types::Category;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DescriptionError {
    /// No API key is configured.
    #[error("description generator API key is not configured")]
    MissingCredential,

    /// Transport failure or non-2xx response.
    #[error("remote generation failed: {0}")]
    Remote(String),

    /// The service answered but produced no text.
    #[error("generator returned no text")]
    Empty,
}

impl From<reqwest::Error> for DescriptionError {
    fn from(e: reqwest::Error) -> Self {
        DescriptionError::Remote(e.to_string())
    }
}

#[async_trait]
pub trait DescriptionGenerator: Send + Sync + 'static {
    async fn generate(&self, title: &str, category: Category) -> Result<String, DescriptionError>;
}

/// Prompt asking for a short catalog blurb aimed at OC artists.
pub fn build_prompt(title: &str, category: Category) -> String {
    format!(
        "Write a short, engaging and professional description (at most 40 words) \
         for a digital asset named \"{title}\" (category: {category}). \
         The asset is used by artists creating original characters (OC). \
         Reply with the description only."
    )
}

/// Google Gemini `generateContent` client.
///
/// One request per call: no retry, no timeout beyond the HTTP client default.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .user_agent(concat!("ocm-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiGenerator {
    async fn generate(&self, title: &str, category: Category) -> Result<String, DescriptionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(DescriptionError::MissingCredential)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(title, category)),
                }],
            }],
        };

        debug!(model = %self.model, title, "requesting description");
        let response: GenerateContentResponse = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.first_text().ok_or(DescriptionError::Empty)
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined and trimmed.
    fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}
