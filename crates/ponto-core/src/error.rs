//! Error types for ponto core.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced while validating and canonicalizing operator input.
///
/// All of these are rejected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A customer identifier is malformed (bad numeric id, unsupported phone
    /// length, empty QR payload).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An amount string did not parse to a positive value.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A tenant connection profile failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
