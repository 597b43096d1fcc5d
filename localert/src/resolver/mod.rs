//! AI destination resolution.
//!
//! Turns free text ("majestic bus stand"), partial input, or a natural-
//! language description ("the big park next to the metro") into coordinates
//! through the Gemini API.
//!
//! # Architecture
//!
//! The [`AiClient`] trait abstracts the model call: one prompt in, one raw
//! JSON document out, constrained by a [`ResponseKind`] schema. The
//! [`GeminiClient`] implementation talks to the Gemini `generateContent`
//! endpoint via `reqwest`. [`DestinationResolver`] layers the shared policy
//! on top of any client:
//!
//! - fail fast with [`ResolveError::MissingCredential`] when no key is set
//! - retry transient failures up to 3 times with 1s/2s/4s backoff, then
//!   surface [`ResolveError::ServiceUnavailable`]
//! - treat a response that parses as JSON but does not match the expected
//!   shape as "not found" (`Ok(None)` / empty list), never as an error
//!
//! Backoff sleeps only the resolver's own future; position tracking runs
//! independently and is never blocked by a retry.

mod client;
mod error;
mod resolve;
mod schema;

pub use client::{AiClient, GeminiClient, ResponseKind, DEFAULT_GEMINI_MODEL};
pub use error::ResolveError;
pub use resolve::{DestinationResolver, MAX_RETRIES};
pub use schema::{DescribedPlacePayload, GeocodePayload, SuggestionsPayload};
