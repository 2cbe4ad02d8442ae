//! Error types for request dispatch.
//!
//! Everything except HTTP 429 is a local-vs-surface binary: transport
//! failures propagate unchanged, non-2xx statuses surface with their body
//! attached, and a 2xx with an unparseable body is its own failure. Rate
//! limiting (429) is recovered inside the dispatch layer and never appears
//! here.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::clients::RequestError;
//!
//! match client.perform(method, path, root_key, payload).await {
//!     Ok(value) => println!("Success: {value:?}"),
//!     Err(RequestError::Api(e)) => {
//!         // 422 validation vs 401/403 auth vs 404 not-found
//!         println!("API error {}: {}", e.status, e.body);
//!     }
//!     Err(RequestError::MalformedBody { status, raw }) => {
//!         println!("Unparseable body for status {status}: {raw}");
//!     }
//!     Err(RequestError::Network(e)) => println!("Transport failure: {e}"),
//!     Err(other) => println!("{other}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the API answers with a non-successful status.
///
/// `body` is the parsed JSON body when the response body was valid JSON,
/// otherwise the raw text wrapped in a JSON string. The status lets
/// callers distinguish validation errors (422) from auth errors (401/403)
/// from not-found (404); this crate does not special-case those further.
#[derive(Debug, Error)]
#[error("Shopify responded with status {status}: {body}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The response body, parsed as JSON when possible.
    pub body: serde_json::Value,
}

/// Error returned when a credential's queue worker is gone.
///
/// Only reachable while the Tokio runtime is shutting down; during normal
/// operation the registry keeps every worker alive for the life of the
/// process.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("request queue closed before the call completed")]
pub struct QueueClosed;

/// Unified error type for logical API calls.
///
/// HTTP 429 never appears here: rate-limited calls are retried inside the
/// dispatch layer until they produce one of these outcomes or succeed.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The underlying network call failed (DNS, connection, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx, non-429 status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx response carried a body that is not valid JSON.
    #[error("response body is not valid JSON (status {status})")]
    MalformedBody {
        /// The HTTP status code of the response.
        status: u16,
        /// The raw response text.
        raw: String,
    },

    /// A response payload did not match the expected model shape.
    #[error("failed to decode response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The per-credential queue worker is gone (runtime shutdown).
    #[error(transparent)]
    QueueClosed(#[from] QueueClosed),
}
