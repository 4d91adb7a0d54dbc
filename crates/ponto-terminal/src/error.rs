//! Terminal SDK error types.

/// Errors that can occur in the terminal SDK.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code from the service envelope.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Local state persistence failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
