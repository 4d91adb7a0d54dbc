//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden - valid credentials but insufficient permissions.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The provider rejected the action with a non-approval result code.
    /// The attempt is already ledgered when this surfaces.
    #[error("transaction rejected: {result_code}")]
    ProviderRejected {
        /// The provider's result code.
        result_code: String,
        /// The rrn of the rejected attempt, when the provider echoed one.
        rrn: Option<String>,
        /// Human-readable rejection detail.
        message: String,
    },

    /// The provider's token endpoint refused to issue a token. Nothing was
    /// submitted, so nothing was ledgered.
    #[error("provider token unavailable: {0}")]
    TokenUnavailable(String),

    /// The provider call failed after submission (transport failure or
    /// non-2xx status). The attempt is already ledgered.
    #[error("provider error: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string(), None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::ProviderRejected {
                result_code,
                rrn,
                message,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "transaction_rejected",
                message.clone(),
                Some(serde_json::json!({
                    "resultCode": result_code,
                    "rrn": rrn,
                })),
            ),
            Self::TokenUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "token_unavailable",
                msg.clone(),
                None,
            ),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg.clone(), None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ponto_store::StoreError> for ApiError {
    fn from(err: ponto_store::StoreError) -> Self {
        match err {
            ponto_store::StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            ponto_store::StoreError::Database(msg)
            | ponto_store::StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

impl From<ponto_core::CoreError> for ApiError {
    fn from(err: ponto_core::CoreError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
