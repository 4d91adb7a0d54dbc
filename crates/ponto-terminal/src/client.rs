//! Ponto service HTTP client implementation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ponto_core::Product;

use crate::error::TerminalError;

/// The customer identifier as sent to the service.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CustomerRef {
    /// Scanned QR payload or an already-derived client code.
    Qr(String),
    /// Manually entered numeric customer id.
    NumericId(String),
    /// Phone number, digits only.
    Phone(String),
}

#[derive(Debug, Serialize)]
struct TransactionBody<'a> {
    customer: &'a CustomerRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    products: &'a [Product],
}

#[derive(Debug, Serialize)]
struct BalanceBody<'a> {
    customer: &'a CustomerRef,
}

/// A processed attempt as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionSummary {
    /// Ledger row id.
    pub attempt_id: String,
    /// Provider result code.
    #[serde(rename = "resultCode")]
    pub result_code: String,
    /// The rrn as ledgered.
    pub rrn: String,
    /// Bonus granted, when returned.
    pub bonus: Option<String>,
    /// Customer balance after the action, when returned.
    pub balance: Option<String>,
    /// Amount in minor units.
    #[serde(rename = "totalAmount")]
    pub total_amount: String,
}

impl TransactionSummary {
    /// Presentational details for the result code, for operator messaging.
    #[must_use]
    pub fn code_info(&self) -> ponto_core::result_codes::CodeInfo {
        ponto_core::result_codes::describe(&self.result_code)
    }

    /// Whether the provider approved this attempt.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        ponto_core::result_codes::is_approved(&self.result_code)
    }

    /// Whether "try again" is sensible advice for this result code.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        ponto_core::result_codes::is_retriable(&self.result_code)
    }
}

/// One ledger row from the history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRow {
    /// Ledger row id.
    pub id: String,
    /// The rrn as ledgered.
    pub rrn: String,
    /// Action type digit string.
    #[serde(rename = "actionType")]
    pub action_type: String,
    /// Provider result code.
    #[serde(rename = "resultCode")]
    pub result_code: String,
    /// Amount in minor units.
    #[serde(rename = "totalAmount")]
    pub total_amount: String,
    /// Bonus granted.
    pub bonus: Option<String>,
    /// Balance returned.
    pub balance: Option<String>,
    /// Failure detail.
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
    /// Row timestamp (RFC 3339).
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

/// Ponto service API client.
///
/// Wraps the service's transaction endpoints with the operator's bearer
/// token.
#[derive(Debug, Clone)]
pub struct TerminalClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TerminalClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the ponto service (e.g., `"http://ponto:8080"`)
    /// * `token` - Operator JWT
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Process a sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service returns an error.
    pub async fn sale(
        &self,
        customer: &CustomerRef,
        amount: Option<&str>,
        products: &[Product],
    ) -> Result<TransactionSummary, TerminalError> {
        self.post_transaction("/v1/transactions", customer, amount, products)
            .await
    }

    /// Process a cashback redemption.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service returns an error.
    pub async fn cashback(
        &self,
        customer: &CustomerRef,
        amount: Option<&str>,
        products: &[Product],
    ) -> Result<TransactionSummary, TerminalError> {
        self.post_transaction("/v1/cashback", customer, amount, products)
            .await
    }

    /// Query a customer's balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service returns an error.
    pub async fn balance(
        &self,
        customer: &CustomerRef,
    ) -> Result<TransactionSummary, TerminalError> {
        let url = format!("{}/v1/balance", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.token))
            .json(&BalanceBody { customer })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List the tenant's ledger, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service returns an error.
    pub async fn history(&self, limit: usize) -> Result<Vec<HistoryRow>, TerminalError> {
        let url = format!("{}/v1/transactions?limit={limit}", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn post_transaction(
        &self,
        route: &str,
        customer: &CustomerRef,
        amount: Option<&str>,
        products: &[Product],
    ) -> Result<TransactionSummary, TerminalError> {
        let url = format!("{}{route}", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.token))
            .json(&TransactionBody {
                customer,
                amount,
                products,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TerminalError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse the service's error envelope
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => Err(TerminalError::Api {
                code: api_error.error.code,
                message: api_error.error.message,
                status: status.as_u16(),
            }),
            Err(_) => Err(TerminalError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}
