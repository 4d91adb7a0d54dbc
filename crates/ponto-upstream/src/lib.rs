//! Loyalty provider API client.
//!
//! The provider exposes two endpoints: a token endpoint that exchanges
//! terminal credentials for a short-lived bearer token, and a transaction
//! endpoint that accepts actions (balance query, sale, cashback) in the
//! provider's digit-string wire dialect.
//!
//! # Example
//!
//! ```no_run
//! use ponto_upstream::{ActionOutcome, ActionRequest, UpstreamClient};
//! use ponto_core::Configuration;
//!
//! # async fn example(config: Configuration) -> Result<(), ponto_upstream::UpstreamError> {
//! let client = UpstreamClient::new();
//! let token = client.get_token(&config).await?;
//!
//! let request = ActionRequest::balance(
//!     &config.terminal_id,
//!     &config.acquirer_id,
//!     ponto_core::timestamps::created_timestamp(),
//!     "0eed2992081af78066bd2e4f8026cf32c4124de1ca",
//! );
//!
//! match client.submit(&config, &token, &request).await {
//!     ActionOutcome::Approved { balance, .. } => println!("balance: {balance:?}"),
//!     other => println!("not approved: {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ActionOutcome, UpstreamClient};
pub use error::UpstreamError;
pub use types::{ActionRequest, ActionResponse, AdditionalData, ResponseData, TokenRequest, TokenResponse};
