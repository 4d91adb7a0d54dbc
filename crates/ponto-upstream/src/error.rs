//! Upstream client error types.

/// Errors that can occur when talking to the loyalty provider.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed before a response body was read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint refused to issue a token.
    #[error("token request failed: {status} - {detail}")]
    Token {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        detail: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
