//! Authentication extractor.
//!
//! Operators authenticate with an HS256 JWT carrying their user id, tenant,
//! and role. The extractor validates the signature and expiry against the
//! service's configured secret.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use ponto_core::{CompanyId, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// The operator role carried in the JWT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Tenant administrator: may change the connection profile.
    Admin,
    /// Regular POS operator.
    Operator,
}

/// JWT claims for operator tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user UUID).
    pub sub: String,
    /// Tenant UUID.
    pub company_id: String,
    /// Operator role.
    pub role: Role,
    /// Expiration time (unix seconds).
    pub exp: i64,
    /// Issued at (unix seconds).
    pub iat: i64,
}

/// An authenticated operator extracted from a bearer JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The operator's user id.
    pub user_id: UserId,
    /// The operator's tenant.
    pub company_id: CompanyId,
    /// The operator's role.
    pub role: Role,
}

impl AuthUser {
    /// Whether this operator may perform admin operations.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            let key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
            let data = decode::<Claims>(token, &key, &Validation::default())
                .map_err(|_| ApiError::Unauthorized)?;

            let user_id = data
                .claims
                .sub
                .parse::<UserId>()
                .map_err(|_| ApiError::Unauthorized)?;
            let company_id = data
                .claims
                .company_id
                .parse::<CompanyId>()
                .map_err(|_| ApiError::Unauthorized)?;

            Ok(AuthUser {
                user_id,
                company_id,
                role: data.claims.role,
            })
        })
    }
}

/// Issue an operator token. Used by provisioning tooling and the test
/// harness; the service itself never mints tokens.
///
/// # Errors
///
/// Returns an error if signing fails.
pub fn issue_token(
    secret: &str,
    user_id: UserId,
    company_id: CompanyId,
    role: Role,
    ttl_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        company_id: company_id.to_string(),
        role,
        exp: now + ttl_seconds,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
