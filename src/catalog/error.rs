//! The single failure kind for provider calls.
//!
//! Any of these aborts the fetch that raised it. No partial data is
//! ever returned alongside an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete (DNS, connect, TLS, reset).
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request URL could not be built from the configured base URL.
    #[error("Invalid request URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The provider answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The offline catalog file could not be read or parsed.
    #[error("Failed to load local catalog '{path}': {message}")]
    LocalCatalog { path: PathBuf, message: String },
}

impl TransportError {
    /// Short message for the error state in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            TransportError::Request { .. } | TransportError::InvalidUrl { .. } => {
                "Unable to reach the movie service"
            }
            TransportError::Status { status: 401, .. } => "The API key was rejected",
            TransportError::Status { status: 429, .. } => "Rate limited by the movie service",
            TransportError::Status { .. } => "The movie service returned an error",
            TransportError::Decode { .. } => "The movie service sent an unexpected response",
            TransportError::LocalCatalog { .. } => "Unable to load the local catalog",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_distinguish_auth_and_rate_limit() {
        let unauthorized = TransportError::Status {
            endpoint: "/movie/popular".to_string(),
            status: 401,
        };
        let limited = TransportError::Status {
            endpoint: "/movie/popular".to_string(),
            status: 429,
        };
        let server = TransportError::Status {
            endpoint: "/movie/popular".to_string(),
            status: 503,
        };

        assert_eq!(unauthorized.user_message(), "The API key was rejected");
        assert_eq!(limited.user_message(), "Rate limited by the movie service");
        assert_eq!(server.user_message(), "The movie service returned an error");
        assert_eq!(server.to_string(), "/movie/popular returned status 503");
    }
}
