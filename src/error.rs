//! Error types for the Mailchimp client
//!
//! Two layers: `ApiError` is the structured problem-details record the API
//! returns on non-2xx responses; `ClientError` is the full taxonomy callers
//! see, covering local encode/decode failures, transport errors, remote API
//! errors and missing-identifier preconditions.

use serde::Deserialize;
use thiserror::Error;

/// Structured error returned by the Mailchimp API on non-2xx responses.
///
/// Follows the RFC 7807 problem-details shape documented by Mailchimp.
/// Absent fields decode to their defaults, matching the server's habit of
/// omitting them.
#[derive(Debug, Clone, Default, Deserialize, Error)]
#[error("{title} ({status}): {detail}")]
pub struct ApiError {
    /// URI reference describing the problem type.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Short human-readable summary of the problem.
    #[serde(default)]
    pub title: String,

    /// HTTP status code as reported in the body.
    #[serde(default)]
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(default)]
    pub detail: String,

    /// Identifier for this specific error occurrence.
    #[serde(default)]
    pub instance: String,
}

/// Errors produced by [`Client`](crate::Client) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure (DNS, connect, TLS, timeout, cancellation).
    /// Passed through from the transport unmodified.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The outbound request body could not be serialized to JSON. Returned
    /// locally, before any I/O happens.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response had a 2xx status but its body could not be decoded into
    /// the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response had a non-2xx status and its body was not valid
    /// problem-details JSON. The original HTTP status is preserved.
    #[error("HTTP {status}: failed to decode error body: {source}")]
    ErrorBodyDecode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The API returned a structured error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A required identifier was empty before a sub-resource call. Detected
    /// locally; no network call is made.
    #[error("missing identifier: {0}")]
    MissingId(&'static str),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
