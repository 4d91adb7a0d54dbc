//! Transaction orchestration.
//!
//! Drives one attempt end to end: tenant profile, terminal resolution,
//! client-code derivation, amount normalization, token, submission, and the
//! audit row. The ledger invariant lives here: every submitted action writes
//! exactly one row, whatever the provider answered; a token failure writes
//! none because nothing was submitted.

use ponto_core::{
    amount, derive_client_code, timestamps, ActionType, AttemptRecord, Configuration, Customer,
    CustomerIdentifier, Product, TransactionAttempt,
};
use ponto_store::Store;
use ponto_upstream::{ActionOutcome, ActionRequest};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// One attempt's worth of operator input, already routed to an action type.
#[derive(Debug, Clone)]
pub struct ActionInput {
    /// The provider operation to perform.
    pub action: ActionType,
    /// The customer identifier the operator supplied.
    pub identifier: CustomerIdentifier,
    /// Major-unit amount string. Required for monetary actions unless the
    /// tenant profile fixes the amount.
    pub amount: Option<String>,
    /// Product line items; a default item is substituted when empty.
    pub products: Vec<Product>,
}

/// The successful result of a processed attempt.
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    /// The ledger row id.
    pub attempt_id: ponto_core::AttemptId,
    /// Provider result code (always `"00"` here).
    pub result_code: String,
    /// The rrn as ledgered.
    pub rrn: String,
    /// Bonus granted, when returned.
    pub bonus: Option<String>,
    /// Customer balance after the action, when returned.
    pub balance: Option<String>,
    /// The canonical client code the attempt ran under.
    pub client_code: String,
    /// Amount in minor units (`"0"` for balance queries).
    pub total_amount_minor: String,
}

/// Process one attempt against the provider.
///
/// # Errors
///
/// - `NotFound` when the tenant has no profile or the profile's terminal is
///   not registered (nothing ledgered).
/// - `BadRequest` for invalid identifiers, amounts, or profiles (nothing
///   ledgered).
/// - `TokenUnavailable` when the token endpoint refuses (nothing ledgered).
/// - `ProviderRejected` / `Upstream` after the attempt was ledgered.
pub async fn process(
    state: &AppState,
    auth: &AuthUser,
    input: ActionInput,
) -> Result<TransactionOutcome, ApiError> {
    let stored = state
        .store
        .get_config(&auth.company_id)?
        .ok_or_else(|| ApiError::NotFound("connection profile not configured".into()))?;
    let config = stored.config;
    config.validate()?;

    let terminal = state
        .store
        .find_terminal(&auth.company_id, &config.terminal_id)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "terminal {} not registered for this company",
                config.terminal_id
            ))
        })?;
    if !terminal.is_active {
        return Err(ApiError::BadRequest(format!(
            "terminal {} is inactive",
            config.terminal_id
        )));
    }

    let client_code = derive_client_code(&input.identifier)?;
    let amount_minor = resolve_amount(&config, input.action, input.amount.as_deref())?;

    // Best effort: a customer-store failure must never block the attempt or
    // its audit row.
    let customer = match state.store.find_or_create_customer(
        &auth.company_id,
        &client_code,
        identifier_seed(&input.identifier),
    ) {
        Ok(customer) => Some(customer),
        Err(e) => {
            tracing::warn!(error = %e, "customer resolution failed, continuing without");
            None
        }
    };

    let token = state.upstream.get_token(&config).await.map_err(|e| {
        tracing::warn!(
            terminal_id = %config.terminal_id,
            error = %e,
            "token request failed"
        );
        ApiError::TokenUnavailable(e.to_string())
    })?;

    let created = timestamps::created_timestamp();
    let our_rrn = input.action.is_monetary().then(timestamps::rrn);

    let request = if let Some(rrn) = &our_rrn {
        let products = if input.products.is_empty() {
            vec![Product::default_item(&amount_minor)]
        } else {
            input.products.clone()
        };
        ActionRequest::monetary(
            input.action,
            &config.terminal_id,
            &config.acquirer_id,
            created,
            &client_code,
            rrn,
            &amount_minor,
            products,
        )
    } else {
        ActionRequest::balance(
            &config.terminal_id,
            &config.acquirer_id,
            created,
            &client_code,
        )
    };

    let request_payload =
        serde_json::to_string(&request).map_err(|e| ApiError::Internal(e.to_string()))?;

    let outcome = state.upstream.submit(&config, &token, &request).await;

    ledger_and_conclude(
        state,
        auth,
        &terminal.id,
        customer.as_ref(),
        input.action,
        &client_code,
        &amount_minor,
        our_rrn,
        request_payload,
        outcome,
    )
}

/// Write the attempt row for a submission outcome and translate it into a
/// response or error.
#[allow(clippy::too_many_arguments)]
fn ledger_and_conclude(
    state: &AppState,
    auth: &AuthUser,
    terminal_record_id: &ponto_core::TerminalRecordId,
    customer: Option<&Customer>,
    action: ActionType,
    client_code: &str,
    amount_minor: &str,
    our_rrn: Option<String>,
    request_payload: String,
    outcome: ActionOutcome,
) -> Result<TransactionOutcome, ApiError> {
    let fallback_rrn = || our_rrn.clone().unwrap_or_else(|| "NONE".to_string());

    let (record, conclusion) = match outcome {
        ActionOutcome::Approved {
            rrn,
            bonus,
            balance,
            response_payload,
        } => {
            let ledger_rrn = rrn.unwrap_or_else(fallback_rrn);
            let record = AttemptRecord {
                rrn: ledger_rrn.clone(),
                action_type: action,
                result_code: "00".to_string(),
                total_amount_minor: amount_minor.to_string(),
                bonus: bonus.clone(),
                balance: balance.clone(),
                error_message: None,
                request_payload: Some(request_payload),
                response_payload: Some(response_payload),
            };
            (record, Ok((ledger_rrn, bonus, balance)))
        }
        ActionOutcome::Rejected {
            result_code,
            rrn,
            details,
            response_payload,
        } => {
            let ledger_rrn = rrn.clone().unwrap_or_else(fallback_rrn);
            let record = AttemptRecord {
                rrn: ledger_rrn,
                action_type: action,
                result_code: result_code.clone(),
                total_amount_minor: amount_minor.to_string(),
                bonus: None,
                balance: None,
                error_message: Some(format!(
                    "Transaction rejected with code: {result_code}"
                )),
                request_payload: Some(request_payload),
                response_payload: Some(response_payload),
            };
            let message = details
                .unwrap_or_else(|| format!("Transaction rejected: {result_code}"));
            (
                record,
                Err(ApiError::ProviderRejected {
                    result_code,
                    rrn,
                    message,
                }),
            )
        }
        ActionOutcome::Failed {
            result_code,
            status,
            detail,
            response_payload,
        } => {
            let record = AttemptRecord {
                rrn: fallback_rrn(),
                action_type: action,
                result_code,
                total_amount_minor: amount_minor.to_string(),
                bonus: None,
                balance: None,
                error_message: Some(detail.clone()),
                request_payload: Some(request_payload),
                response_payload,
            };
            (
                record,
                Err(ApiError::Upstream(format!(
                    "provider returned HTTP {status}: {detail}"
                ))),
            )
        }
        ActionOutcome::Transport { detail } => {
            let record = AttemptRecord {
                rrn: fallback_rrn(),
                action_type: action,
                result_code: "ERROR".to_string(),
                total_amount_minor: amount_minor.to_string(),
                bonus: None,
                balance: None,
                error_message: Some(detail.clone()),
                request_payload: Some(request_payload),
                response_payload: None,
            };
            (record, Err(ApiError::Upstream(detail)))
        }
    };

    let attempt = TransactionAttempt::from_record(
        auth.company_id,
        *terminal_record_id,
        Some(auth.user_id),
        customer.map(|c| c.id),
        record,
    );
    let result_code = attempt.result_code.clone();
    let attempt_id = state.store.save_attempt(&attempt)?;

    tracing::info!(
        attempt_id = %attempt_id,
        action = %action,
        result_code = %result_code,
        "attempt ledgered"
    );

    match conclusion {
        Ok((rrn, bonus, balance)) => {
            if let (Some(customer), Some(balance_value)) = (customer, balance.as_ref()) {
                if let Err(e) = state
                    .store
                    .update_customer_balance(&customer.id, balance_value)
                {
                    tracing::warn!(error = %e, "balance cache update failed");
                }
            }

            Ok(TransactionOutcome {
                attempt_id,
                result_code,
                rrn,
                bonus,
                balance,
                client_code: client_code.to_string(),
                total_amount_minor: amount_minor.to_string(),
            })
        }
        Err(e) => Err(e),
    }
}

/// Resolve the minor-unit amount for an action.
fn resolve_amount(
    config: &Configuration,
    action: ActionType,
    amount_major: Option<&str>,
) -> Result<String, ApiError> {
    if !action.is_monetary() {
        return Ok("0".to_string());
    }
    if config.use_fixed_amount {
        return Ok(amount::fixed_minor_units());
    }
    let major = amount_major
        .ok_or_else(|| ApiError::BadRequest("amount is required for this action".into()))?;
    Ok(amount::to_minor_units(major)?)
}

/// The raw identifier value kept on the customer record for lookup. QR
/// payloads are already opaque provider codes and carry no seed.
fn identifier_seed(identifier: &CustomerIdentifier) -> Option<&str> {
    match identifier {
        CustomerIdentifier::Qr(_) => None,
        CustomerIdentifier::NumericId(value) | CustomerIdentifier::Phone(value) => Some(value),
    }
}
