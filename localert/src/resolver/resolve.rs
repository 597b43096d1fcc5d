//! Destination resolver: prompts, retry policy, and shape validation.

use std::time::Duration;

use serde_json::Value;

use super::client::{AiClient, ResponseKind};
use super::error::ResolveError;
use super::schema::{DescribedPlacePayload, GeocodePayload, SuggestionsPayload};
use crate::commute::Destination;
use crate::coord::Coordinates;

/// Retries after the initial attempt: 3, with 1s/2s/4s backoff.
pub const MAX_RETRIES: u32 = 3;

/// Minimum query length before suggestions issue a network call.
const MIN_SUGGEST_LEN: usize = 3;

/// Resolves destinations through any [`AiClient`].
///
/// All three operations share one policy: retry transient failures with
/// exponential backoff, validate the response against the expected shape,
/// and treat a shape mismatch as "not found" rather than an error.
pub struct DestinationResolver<C> {
    client: C,
}

impl<C: AiClient> DestinationResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Resolve a place name or address to coordinates.
    ///
    /// Returns `Ok(None)` when the service cannot identify the place or
    /// answers with an unexpected shape.
    pub async fn resolve_by_name(
        &self,
        destination: &str,
        user_location: Option<Coordinates>,
    ) -> Result<Option<Coordinates>, ResolveError> {
        let prompt = format!(
            "Provide the precise geographic coordinates (latitude and longitude) \
             for the following location: \"{destination}\". {} Prioritize results in India.",
            location_context(user_location)
        );

        let text = self
            .call_with_retry(&prompt, ResponseKind::Coordinates)
            .await?;
        Ok(parse_shape::<GeocodePayload>(&text)
            .and_then(|p| Coordinates::new(p.latitude, p.longitude).ok()))
    }

    /// Fetch up to five suggestion strings for a partial query.
    ///
    /// Short-circuits to an empty list without any network call when the
    /// query is under three characters.
    pub async fn suggest(
        &self,
        query: &str,
        user_location: Option<Coordinates>,
    ) -> Result<Vec<String>, ResolveError> {
        if query.chars().count() < MIN_SUGGEST_LEN {
            return Ok(Vec::new());
        }

        let prompt = format!(
            "Provide up to 5 relevant location name suggestions for the search term \
             \"{query}\". {} The suggestions should be concise and relevant for a \
             location search box, prioritizing locations in India.",
            suggest_context(user_location)
        );

        let text = self
            .call_with_retry(&prompt, ResponseKind::Suggestions)
            .await?;
        Ok(parse_shape::<SuggestionsPayload>(&text)
            .map(|p| p.suggestions)
            .unwrap_or_default())
    }

    /// Resolve a natural-language description to a named destination.
    ///
    /// Returns `Ok(None)` when no specific place can be identified.
    pub async fn resolve_by_description(
        &self,
        description: &str,
        user_location: Option<Coordinates>,
    ) -> Result<Option<Destination>, ResolveError> {
        let prompt = format!(
            "A user wants to set a destination for a commute alert. They described \
             the location as: \"{description}\".\n\
             Based on this description and their current location context ({}), \
             identify the most likely specific place (like a store, park, \
             intersection, or building) they are referring to.\n\
             Provide the official or common name of that place and its precise \
             geographic coordinates. Prioritize well-known public places and \
             transport hubs in India if the context is ambiguous.",
            location_context(user_location)
        );

        let text = self
            .call_with_retry(&prompt, ResponseKind::DescribedPlace)
            .await?;
        Ok(parse_shape::<DescribedPlacePayload>(&text).and_then(|p| {
            let coords = Coordinates::new(p.latitude, p.longitude).ok()?;
            Some(Destination::new(p.place_name, coords))
        }))
    }

    /// Run one model call, retrying transient failures.
    async fn call_with_retry(
        &self,
        prompt: &str,
        kind: ResponseKind,
    ) -> Result<String, ResolveError> {
        let mut last_error: Option<ResolveError> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt - 1);
                tracing::warn!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    "AI call failed, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }
            match self.client.generate(prompt, kind).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Err(ResolveError::ServiceUnavailable {
            attempts: MAX_RETRIES + 1,
            detail,
        })
    }
}

/// Parse the fixed-shape payload; a mismatch is "not found".
///
/// The text has already survived the transport layer, so invalid JSON was
/// retried there. Here a structurally different document simply means the
/// model had no answer in the contract shape.
fn parse_shape<T: serde::de::DeserializeOwned>(text: &str) -> Option<T> {
    let value: Value = serde_json::from_str(text).ok()?;
    match serde_json::from_value::<T>(value) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::warn!(error = %e, "AI response did not match the expected shape");
            None
        }
    }
}

/// Exponential backoff: 1s, 2s, 4s.
fn backoff_delay(retry: u32) -> Duration {
    Duration::from_secs(1u64 << retry.min(20))
}

fn location_context(user_location: Option<Coordinates>) -> String {
    match user_location {
        Some(c) => format!(
            "The user is currently near latitude {} and longitude {}.",
            c.latitude, c.longitude
        ),
        None => "The user is likely in India.".to_string(),
    }
}

fn suggest_context(user_location: Option<Coordinates>) -> String {
    match user_location {
        Some(c) => format!(
            "The user is searching from near latitude {} and longitude {}.",
            c.latitude, c.longitude
        ),
        None => "The user is likely in India.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Client that replays canned outcomes and counts calls.
    struct MockAiClient {
        responses: Mutex<Vec<Result<String, ResolveError>>>,
        calls: AtomicUsize,
    }

    impl MockAiClient {
        fn new(responses: Vec<Result<String, ResolveError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }

        fn always_failing() -> Self {
            Self::new(Vec::new())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AiClient for MockAiClient {
        async fn generate(
            &self,
            _prompt: &str,
            _kind: ResponseKind,
        ) -> Result<String, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Err(ResolveError::Http("connection refused".to_string()))
            } else {
                responses.remove(0)
            }
        }
    }

    fn here() -> Option<Coordinates> {
        Some(Coordinates::new(12.9716, 77.5946).unwrap())
    }

    #[test]
    fn test_backoff_delays() {
        assert_eq!(backoff_delay(0), Duration::from_secs(1));
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_resolve_by_name_success() {
        let client = MockAiClient::new(vec![Ok(
            r#"{"latitude": 12.9766, "longitude": 77.5713}"#.to_string()
        )]);
        let resolver = DestinationResolver::new(client);

        let coords = resolver
            .resolve_by_name("Majestic bus stand", here())
            .await
            .unwrap()
            .unwrap();
        assert!((coords.latitude - 12.9766).abs() < 1e-9);
        assert_eq!(resolver.client.calls(), 1);
    }

    #[tokio::test]
    async fn test_resolve_by_name_shape_mismatch_is_not_found() {
        let client = MockAiClient::new(vec![Ok(
            r#"{"lat": "twelve", "lng": 77.0}"#.to_string()
        )]);
        let resolver = DestinationResolver::new(client);

        let result = resolver.resolve_by_name("somewhere", None).await.unwrap();
        assert!(result.is_none());
        // No retry for a shape mismatch: the call itself succeeded
        assert_eq!(resolver.client.calls(), 1);
    }

    #[tokio::test]
    async fn test_resolve_by_name_out_of_range_coords_is_not_found() {
        let client = MockAiClient::new(vec![Ok(
            r#"{"latitude": 123.0, "longitude": 456.0}"#.to_string()
        )]);
        let resolver = DestinationResolver::new(client);

        let result = resolver.resolve_by_name("somewhere", None).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_retry_then_success() {
        tokio::time::pause();
        let client = MockAiClient::new(vec![
            Err(ResolveError::Http("503".to_string())),
            Ok(r#"{"latitude": 1.0, "longitude": 2.0}"#.to_string()),
        ]);
        let resolver = DestinationResolver::new(client);

        let coords = resolver.resolve_by_name("x", None).await.unwrap().unwrap();
        assert_eq!(coords.latitude, 1.0);
        assert_eq!(resolver.client.calls(), 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted_surfaces_service_unavailable() {
        tokio::time::pause();
        let client = MockAiClient::always_failing();
        let resolver = DestinationResolver::new(client);

        let result = resolver.resolve_by_name("x", None).await;
        assert!(matches!(
            result,
            Err(ResolveError::ServiceUnavailable { attempts: 4, .. })
        ));
        assert_eq!(resolver.client.calls(), 4);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_fast_without_retry() {
        let client = MockAiClient::new(vec![Err(ResolveError::MissingCredential)]);
        let resolver = DestinationResolver::new(client);

        let result = resolver.resolve_by_name("x", None).await;
        assert_eq!(result, Err(ResolveError::MissingCredential));
        assert_eq!(resolver.client.calls(), 1);
    }

    #[tokio::test]
    async fn test_suggest_short_query_skips_network() {
        let client = MockAiClient::always_failing();
        let resolver = DestinationResolver::new(client);

        let suggestions = resolver.suggest("ab", here()).await.unwrap();
        assert!(suggestions.is_empty());
        assert_eq!(resolver.client.calls(), 0, "no network call for short input");
    }

    #[tokio::test]
    async fn test_suggest_issues_exactly_one_call() {
        let client = MockAiClient::new(vec![Ok(
            r#"{"suggestions": ["Cubbon Park", "Cubbonpet Main Road"]}"#.to_string(),
        )]);
        let resolver = DestinationResolver::new(client);

        let suggestions = resolver.suggest("cub", here()).await.unwrap();
        assert_eq!(suggestions, vec!["Cubbon Park", "Cubbonpet Main Road"]);
        assert_eq!(resolver.client.calls(), 1);
    }

    #[tokio::test]
    async fn test_suggest_shape_mismatch_is_empty() {
        let client = MockAiClient::new(vec![Ok(r#"{"items": []}"#.to_string())]);
        let resolver = DestinationResolver::new(client);

        let suggestions = resolver.suggest("abc", None).await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_by_description_success() {
        let client = MockAiClient::new(vec![Ok(
            r#"{"placeName": "Cubbon Park", "latitude": 12.9763, "longitude": 77.5929}"#
                .to_string(),
        )]);
        let resolver = DestinationResolver::new(client);

        let dest = resolver
            .resolve_by_description("the big park near the metro", here())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(dest.name, "Cubbon Park");
        assert!((dest.coords.longitude - 77.5929).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_resolve_by_description_missing_name_is_not_found() {
        let client = MockAiClient::new(vec![Ok(
            r#"{"latitude": 12.9763, "longitude": 77.5929}"#.to_string(),
        )]);
        let resolver = DestinationResolver::new(client);

        let result = resolver
            .resolve_by_description("somewhere", None)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
