//! Tenant connection-profile handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use ponto_core::Configuration;
use ponto_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Connection-profile response. The terminal password is always redacted.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    /// The profile with `aid_pass` masked.
    pub config: Configuration,
    /// When the profile was first saved (RFC 3339).
    pub created_at: String,
    /// When the profile was last changed (RFC 3339).
    pub updated_at: String,
}

/// Get the tenant's connection profile, redacted.
pub async fn get_config(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ConfigResponse>, ApiError> {
    let stored = state
        .store
        .get_config(&auth.company_id)?
        .ok_or_else(|| ApiError::NotFound("connection profile not configured".into()))?;

    Ok(Json(ConfigResponse {
        config: stored.config.redacted(),
        created_at: stored.created_at.to_rfc3339(),
        updated_at: stored.updated_at.to_rfc3339(),
    }))
}

/// Replace the tenant's connection profile. Admin only.
pub async fn put_config(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(config): Json<Configuration>,
) -> Result<Json<ConfigResponse>, ApiError> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }

    config.validate()?;
    let stored = state.store.set_config(&auth.company_id, &config)?;

    tracing::info!(
        company_id = %auth.company_id,
        config = ?stored.config.redacted(),
        "connection profile updated"
    );

    Ok(Json(ConfigResponse {
        config: stored.config.redacted(),
        created_at: stored.created_at.to_rfc3339(),
        updated_at: stored.updated_at.to_rfc3339(),
    }))
}
