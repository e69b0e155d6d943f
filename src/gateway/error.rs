//! Error types for the completion gateway

use thiserror::Error;

/// Errors that can occur when calling the completion provider
///
/// Gateway failures are never surfaced to HTTP callers as transport errors;
/// the conversation service converts them into degraded response content.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failures
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// Stream interrupted or malformed mid-flight
    #[error("Stream error: {0}")]
    Stream(String),

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}
