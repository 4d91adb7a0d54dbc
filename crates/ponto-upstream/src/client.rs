//! Loyalty provider HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use ponto_core::Configuration;

use crate::error::UpstreamError;
use crate::types::{ActionRequest, ActionResponse, TokenRequest, TokenResponse};

/// The outcome of submitting an action to the provider.
///
/// Everything except a token failure produces one of these, because every
/// submitted action must leave exactly one audit row regardless of how the
/// provider answered. `response_payload` carries the raw body for the ledger.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The provider approved the action (`resultCode == "00"`).
    Approved {
        /// The provider's rrn echo, when present.
        rrn: Option<String>,
        /// Bonus granted, when returned.
        bonus: Option<String>,
        /// Customer balance after the action, when returned.
        balance: Option<String>,
        /// Raw response body.
        response_payload: String,
    },

    /// The provider answered with a non-approval result code.
    Rejected {
        /// The provider's result code.
        result_code: String,
        /// The provider's rrn echo, when present.
        rrn: Option<String>,
        /// Rejection detail, when any.
        details: Option<String>,
        /// Raw response body.
        response_payload: String,
    },

    /// The provider answered with a non-2xx HTTP status.
    ///
    /// Ledgered under the body's result code when one was parseable, `"ERROR"`
    /// otherwise.
    Failed {
        /// Result code for the ledger.
        result_code: String,
        /// HTTP status code.
        status: u16,
        /// Failure detail for the ledger's error message.
        detail: String,
        /// Raw response body, when one was read.
        response_payload: Option<String>,
    },

    /// The request never completed (connect, timeout, or read failure).
    ///
    /// Ledgered as `"ERROR"` with no response payload.
    Transport {
        /// Failure detail for the ledger's error message.
        detail: String,
    },
}

/// Loyalty provider API client.
///
/// Holds only the HTTP client; the provider host and credentials come from
/// each tenant's [`Configuration`] per call, since different tenants may
/// point at different provider installations.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamClient {
    /// Create a new provider client with the default 30 second timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Obtain a short-lived bearer token from the provider.
    ///
    /// Tokens expire quickly; callers request a fresh one per transaction.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Token` when the endpoint answers non-2xx, with
    /// the response body as detail when one could be read.
    pub async fn get_token(&self, config: &Configuration) -> Result<String, UpstreamError> {
        let url = format!(
            "{}{}",
            config.host.trim_end_matches('/'),
            config.token_endpoint
        );
        let request = TokenRequest {
            terminal_id: config.terminal_id.clone(),
            acquirer_id: config.acquirer_id.clone(),
            language: "en".to_string(),
            password: config.aid_pass.clone(),
        };

        tracing::debug!(terminal_id = %config.terminal_id, "requesting provider token");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(UpstreamError::Token {
                status: status.as_u16(),
                detail,
            });
        }

        let body: TokenResponse = response.json().await?;
        Ok(body.token)
    }

    /// Submit an action to the provider's transaction endpoint.
    ///
    /// Never returns an error: transport failures and non-2xx statuses become
    /// [`ActionOutcome`] variants so the caller can ledger them.
    pub async fn submit(
        &self,
        config: &Configuration,
        token: &str,
        request: &ActionRequest,
    ) -> ActionOutcome {
        let url = format!(
            "{}{}",
            config.host.trim_end_matches('/'),
            config.transaction_endpoint
        );

        tracing::debug!(
            action_type = %request.action_type,
            terminal_id = %request.terminal_id,
            "submitting provider action"
        );

        let response = match self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "provider request failed in transport");
                return ActionOutcome::Transport {
                    detail: e.to_string(),
                };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return ActionOutcome::Transport {
                    detail: e.to_string(),
                }
            }
        };

        let parsed: Option<ActionResponse> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let result_code = parsed
                .as_ref()
                .and_then(|r| r.result_code.clone())
                .unwrap_or_else(|| "ERROR".to_string());
            let detail = parsed
                .as_ref()
                .and_then(|r| r.error.clone())
                .unwrap_or_else(|| format!("HTTP {status}"));
            return ActionOutcome::Failed {
                result_code,
                status: status.as_u16(),
                detail,
                response_payload: Some(body),
            };
        }

        let Some(parsed) = parsed else {
            return ActionOutcome::Failed {
                result_code: "ERROR".to_string(),
                status: status.as_u16(),
                detail: "unparseable provider response".to_string(),
                response_payload: Some(body),
            };
        };

        match parsed.result_code.as_deref() {
            Some("00") => {
                let data = parsed.additional_data.unwrap_or_default();
                ActionOutcome::Approved {
                    rrn: parsed.rrn,
                    bonus: data.bonus,
                    balance: data.balance,
                    response_payload: body,
                }
            }
            Some(code) => ActionOutcome::Rejected {
                result_code: code.to_string(),
                rrn: parsed.rrn,
                details: parsed.details.or(parsed.error),
                response_payload: body,
            },
            None => ActionOutcome::Failed {
                result_code: "ERROR".to_string(),
                status: status.as_u16(),
                detail: "provider response missing resultCode".to_string(),
                response_payload: Some(body),
            },
        }
    }
}
