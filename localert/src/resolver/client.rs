//! AI client trait and Gemini implementation.
//!
//! The [`AiClient`] trait abstracts the model call so the resolver's policy
//! layer can be tested against canned responses. The [`GeminiClient`]
//! implementation issues structured `generateContent` requests via `reqwest`
//! with a JSON response mime type and a response schema matching the
//! requested [`ResponseKind`].

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use super::error::ResolveError;

/// Default HTTP timeout for AI calls.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Model used for all resolution calls.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Gemini API.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the service credential.
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Which fixed response shape to constrain the model to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// `{latitude, longitude}`
    Coordinates,
    /// `{suggestions: [string]}`
    Suggestions,
    /// `{placeName, latitude, longitude}`
    DescribedPlace,
}

impl ResponseKind {
    /// The response schema sent with the request.
    fn schema(&self) -> serde_json::Value {
        match self {
            Self::Coordinates => json!({
                "type": "OBJECT",
                "properties": {
                    "latitude": {"type": "NUMBER", "description": "The latitude of the location."},
                    "longitude": {"type": "NUMBER", "description": "The longitude of the location."}
                },
                "required": ["latitude", "longitude"]
            }),
            Self::Suggestions => json!({
                "type": "OBJECT",
                "properties": {
                    "suggestions": {
                        "type": "ARRAY",
                        "items": {"type": "STRING", "description": "A single location suggestion name."},
                        "description": "An array of location suggestion strings."
                    }
                },
                "required": ["suggestions"]
            }),
            Self::DescribedPlace => json!({
                "type": "OBJECT",
                "properties": {
                    "placeName": {"type": "STRING", "description": "The official or common name of the identified location."},
                    "latitude": {"type": "NUMBER", "description": "The latitude of the location."},
                    "longitude": {"type": "NUMBER", "description": "The longitude of the location."}
                },
                "required": ["placeName", "latitude", "longitude"]
            }),
        }
    }
}

/// Trait for issuing one structured model call.
///
/// Implementations return the model's raw JSON text; the resolver validates
/// the shape.
pub trait AiClient: Send + Sync {
    /// Generate a JSON document answering `prompt`, constrained to `kind`.
    fn generate(
        &self,
        prompt: &str,
        kind: ResponseKind,
    ) -> impl Future<Output = Result<String, ResolveError>> + Send;
}

/// Gemini `generateContent` response envelope.
///
/// We only deserialize the path to the generated text; everything else is
/// ignored.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini client using direct HTTP requests.
///
/// Uses a reusable `reqwest::Client` with connection pooling and timeouts.
pub struct GeminiClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with an explicit credential.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ResolveError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ResolveError::MissingCredential);
        }
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| ResolveError::Http(e.to_string()))?;
        Ok(Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            http,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ResolveError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Self::new(key),
            _ => Err(ResolveError::MissingCredential),
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

impl AiClient for GeminiClient {
    async fn generate(&self, prompt: &str, kind: ResponseKind) -> Result<String, ResolveError> {
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": kind.schema(),
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| ResolveError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Http(format!("status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResolveError::Http(e.to_string()))?;

        let envelope: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ResolveError::Malformed(e.to_string()))?;

        let text = envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default();

        tracing::debug!(
            kind = ?kind,
            response_len = text.len(),
            "AI generation completed"
        );

        if text.is_empty() {
            return Err(ResolveError::Malformed("empty response".to_string()));
        }
        Ok(text)
    }
}
