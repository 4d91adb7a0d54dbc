//! Ponto HTTP API Service.
//!
//! This crate provides the HTTP API for the ponto loyalty platform:
//!
//! - Sale, cashback, and balance actions against the loyalty provider
//! - Per-tenant connection profiles
//! - The append-only transaction ledger and its CSV export
//!
//! # Authentication
//!
//! Operators authenticate with HS256 JWTs carrying their user id, tenant,
//! and role. Profile changes require the admin role.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers stay async for router consistency

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod routes;
pub mod state;

pub use auth::{AuthUser, Role};
pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
