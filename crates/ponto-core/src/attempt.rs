//! The ledger record: one row per transaction attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::ids::{AttemptId, CompanyId, CustomerId, TerminalRecordId, UserId};

/// An audit record of a single attempt against the provider.
///
/// One row is written for every submitted action — approved, rejected, or
/// failed in transport — so the audit trail never has invisible attempts.
/// Rows are immutable once written. Token-endpoint failures are the one
/// exception: no terminal-scoped action was submitted, so nothing is
/// ledgered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionAttempt {
    /// Time-ordered attempt id.
    pub id: AttemptId,

    /// Owning tenant.
    pub company_id: CompanyId,

    /// The terminal record the attempt ran on.
    pub terminal_id: TerminalRecordId,

    /// The customer, when resolution succeeded. A customer-store failure
    /// must not block the ledger write, so this is nullable.
    pub customer_id: Option<CustomerId>,

    /// The operator who processed the attempt.
    pub user_id: Option<UserId>,

    /// Reference Retrieval Number: the provider's echo when present, our
    /// generated value otherwise, `"NONE"` for balance queries.
    pub rrn: String,

    /// The provider operation (3 / 4 / 8).
    pub action_type: ActionType,

    /// Provider result code, or `"ERROR"` for transport-level failures.
    pub result_code: String,

    /// Amount in minor units; `"0"` for balance queries.
    pub total_amount_minor: String,

    /// Bonus granted, when the provider returned one.
    pub bonus: Option<String>,

    /// Customer balance after the action, when returned.
    pub balance: Option<String>,

    /// Failure detail for rejected or failed attempts.
    pub error_message: Option<String>,

    /// Serialized request body as sent upstream.
    pub request_payload: Option<String>,

    /// Serialized response body as received, when any.
    pub response_payload: Option<String>,

    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

/// The attempt fields the orchestrator fills in; ids and the timestamp are
/// assigned at construction.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// See [`TransactionAttempt::rrn`].
    pub rrn: String,
    /// The provider operation.
    pub action_type: ActionType,
    /// See [`TransactionAttempt::result_code`].
    pub result_code: String,
    /// Amount in minor units.
    pub total_amount_minor: String,
    /// Bonus granted.
    pub bonus: Option<String>,
    /// Balance returned.
    pub balance: Option<String>,
    /// Failure detail.
    pub error_message: Option<String>,
    /// Serialized request body.
    pub request_payload: Option<String>,
    /// Serialized response body.
    pub response_payload: Option<String>,
}

impl TransactionAttempt {
    /// Assemble a full ledger row from an orchestrator record.
    #[must_use]
    pub fn from_record(
        company_id: CompanyId,
        terminal_id: TerminalRecordId,
        user_id: Option<UserId>,
        customer_id: Option<CustomerId>,
        record: AttemptRecord,
    ) -> Self {
        Self {
            id: AttemptId::generate(),
            company_id,
            terminal_id,
            customer_id,
            user_id,
            rrn: record.rrn,
            action_type: record.action_type,
            result_code: record.result_code,
            total_amount_minor: record.total_amount_minor,
            bonus: record.bonus,
            balance: record.balance,
            error_message: record.error_message,
            request_payload: record.request_payload,
            response_payload: record.response_payload,
            created_at: Utc::now(),
        }
    }
}
