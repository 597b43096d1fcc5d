//! Error types for AI destination resolution.

use thiserror::Error;

/// Errors from the AI resolution client.
///
/// `NotFound` is deliberately absent: an answer the service could not
/// produce is modeled as `Ok(None)` or an empty list, because it is a
/// normal outcome the UI handles inline, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No service credential is configured.
    #[error("AI service credential is missing; set GEMINI_API_KEY")]
    MissingCredential,

    /// Transport failure (connect, TLS, non-success status).
    ///
    /// Transient: the resolver retries these.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The service answered with something that is not valid JSON.
    ///
    /// Transient: the resolver retries these.
    #[error("Malformed response from AI service: {0}")]
    Malformed(String),

    /// Retries exhausted.
    #[error("The AI service is unavailable after {attempts} attempts: {detail}")]
    ServiceUnavailable { attempts: u32, detail: String },
}

impl ResolveError {
    /// True for failures worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Malformed(_))
    }
}
