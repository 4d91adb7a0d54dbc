//! Transaction, balance, history, and export handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use ponto_core::{ActionType, CustomerIdentifier, Product, TransactionAttempt};
use ponto_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::orchestrator::{self, ActionInput};
use crate::state::AppState;

/// The customer identifier as supplied by the terminal UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CustomerInput {
    /// Scanned QR payload, already in provider format.
    Qr(String),
    /// Manually entered numeric customer id.
    NumericId(String),
    /// Phone number, digits only.
    Phone(String),
}

impl From<CustomerInput> for CustomerIdentifier {
    fn from(input: CustomerInput) -> Self {
        match input {
            CustomerInput::Qr(value) => Self::Qr(value),
            CustomerInput::NumericId(value) => Self::NumericId(value),
            CustomerInput::Phone(value) => Self::Phone(value),
        }
    }
}

/// Sale / cashback request body.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// The customer identifier.
    pub customer: CustomerInput,
    /// Major-unit amount string, e.g. `"15,50"`.
    pub amount: Option<String>,
    /// Product line items; defaulted when omitted.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Balance query request body.
#[derive(Debug, Deserialize)]
pub struct BalanceRequest {
    /// The customer identifier.
    pub customer: CustomerInput,
}

/// Processed-attempt response.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
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

impl From<orchestrator::TransactionOutcome> for TransactionResponse {
    fn from(outcome: orchestrator::TransactionOutcome) -> Self {
        Self {
            attempt_id: outcome.attempt_id.to_string(),
            result_code: outcome.result_code,
            rrn: outcome.rrn,
            bonus: outcome.bonus,
            balance: outcome.balance,
            total_amount: outcome.total_amount_minor,
        }
    }
}

/// Process a sale (action type 4).
pub async fn create_sale(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let outcome = orchestrator::process(
        &state,
        &auth,
        ActionInput {
            action: ActionType::Sale,
            identifier: body.customer.into(),
            amount: body.amount,
            products: body.products,
        },
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// Process a cashback redemption (action type 8).
pub async fn create_cashback(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let outcome = orchestrator::process(
        &state,
        &auth,
        ActionInput {
            action: ActionType::Cashback,
            identifier: body.customer.into(),
            amount: body.amount,
            products: body.products,
        },
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// Query a customer's balance (action type 3).
pub async fn query_balance(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<BalanceRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let outcome = orchestrator::process(
        &state,
        &auth,
        ActionInput {
            action: ActionType::BalanceQuery,
            identifier: body.customer.into(),
            amount: None,
            products: Vec::new(),
        },
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// History query parameters.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of rows to return (default: 50).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// One ledger row in history responses.
#[derive(Debug, Serialize)]
pub struct AttemptResponse {
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

impl From<&TransactionAttempt> for AttemptResponse {
    fn from(attempt: &TransactionAttempt) -> Self {
        Self {
            id: attempt.id.to_string(),
            rrn: attempt.rrn.clone(),
            action_type: attempt.action_type.as_str().to_string(),
            result_code: attempt.result_code.clone(),
            total_amount: attempt.total_amount_minor.clone(),
            bonus: attempt.bonus.clone(),
            balance: attempt.balance.clone(),
            error_message: attempt.error_message.clone(),
            created_at: attempt.created_at.to_rfc3339(),
        }
    }
}

/// List the tenant's ledger, newest first.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<AttemptResponse>>, ApiError> {
    let attempts = state.store.list_attempts(&auth.company_id, query.limit)?;
    Ok(Json(attempts.iter().map(AttemptResponse::from).collect()))
}

/// CSV export request body: the rows the terminal wants in the file.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Rows to export, as returned by the history endpoint.
    pub transactions: Vec<ExportRow>,
}

/// One row of a CSV export.
#[derive(Debug, Deserialize)]
pub struct ExportRow {
    /// Row timestamp.
    pub created_at: String,
    /// The rrn as ledgered.
    #[serde(default)]
    pub rrn: Option<String>,
    /// Provider result code.
    #[serde(rename = "resultCode")]
    pub result_code: String,
    /// Bonus granted.
    #[serde(default)]
    pub bonus: Option<String>,
    /// Balance returned.
    #[serde(default)]
    pub balance: Option<String>,
    /// Failure detail.
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
}

/// Export supplied ledger rows as CSV.
pub async fn export_csv(
    auth: AuthUser,
    Json(body): Json<ExportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(
        company_id = %auth.company_id,
        rows = body.transactions.len(),
        "exporting transaction CSV"
    );

    let csv = generate_csv(&body.transactions);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"transactions_{}.csv\"",
                    chrono::Utc::now().timestamp()
                ),
            ),
        ],
        csv,
    ))
}

fn generate_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from("Timestamp,RRN,Result Code,Bonus,Balance,Error Message\n");
    for row in rows {
        let cells = [
            row.created_at.as_str(),
            row.rrn.as_deref().unwrap_or(""),
            row.result_code.as_str(),
            row.bonus.as_deref().unwrap_or(""),
            row.balance.as_deref().unwrap_or(""),
            row.error_message.as_deref().unwrap_or(""),
        ];
        let line: Vec<String> = cells.iter().map(|cell| csv_quote(cell)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn csv_quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
