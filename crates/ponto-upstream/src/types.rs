//! Provider wire types.
//!
//! Every field name and string convention here is dictated by the provider's
//! API contract: digit-string action types, camelCase keys, amounts as
//! integer strings in minor units.

use serde::{Deserialize, Serialize};

use ponto_core::{ActionType, Product};

/// Token endpoint request body.
///
/// `password` is the terminal's `aid_pass`, not an operator credential.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    /// Provider-facing terminal id.
    #[serde(rename = "terminalID")]
    pub terminal_id: String,
    /// Acquirer identifier.
    #[serde(rename = "acquirerID")]
    pub acquirer_id: String,
    /// Always `"en"`.
    pub language: String,
    /// Terminal password. Secret; never log this struct.
    pub password: String,
}

/// Token endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Short-lived bearer token for the action endpoint.
    pub token: String,
}

/// Product list plus running total, attached to monetary actions only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalData {
    /// Line items, amounts already overridden to the attempt amount.
    pub products: Vec<Product>,
    /// Sum of product costs in minor units.
    #[serde(rename = "totalPcost")]
    pub total_p_cost: String,
}

/// Action endpoint request body.
///
/// Balance queries (action type 3) MUST omit `rrn`, `totalAmount`, and
/// `additionalData` entirely; the provider rejects a balance query that
/// carries an rrn with error code 71. The `skip_serializing_if` attributes
/// enforce the omission at the serializer.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    /// Operation selector: `"3"`, `"4"`, or `"8"`.
    #[serde(rename = "actionType")]
    pub action_type: ActionType,
    /// Provider-facing terminal id.
    #[serde(rename = "terminalID")]
    pub terminal_id: String,
    /// Acquirer identifier.
    #[serde(rename = "acquirerID")]
    pub acquirer_id: String,
    /// 17-digit provider-local timestamp.
    pub created: String,
    /// Canonical client code (`"0e…"`, `"0f…"`, or raw QR).
    #[serde(rename = "clientID")]
    pub client_id: String,
    /// 16-digit reference retrieval number. Monetary actions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrn: Option<String>,
    /// Amount in minor units. Monetary actions only.
    #[serde(rename = "totalAmount", skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,
    /// Products. Monetary actions only.
    #[serde(rename = "additionalData", skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<AdditionalData>,
    /// Always `"986"` (BRL). Monetary actions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Fixed authorization code the provider expects.
    #[serde(rename = "authCode", skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
}

impl ActionRequest {
    /// Build a monetary action (sale or cashback).
    #[must_use]
    pub fn monetary(
        action_type: ActionType,
        terminal_id: impl Into<String>,
        acquirer_id: impl Into<String>,
        created: impl Into<String>,
        client_id: impl Into<String>,
        rrn: impl Into<String>,
        amount_minor: &str,
        products: Vec<Product>,
    ) -> Self {
        let products: Vec<Product> = products
            .into_iter()
            .map(|p| p.with_attempt_amount(amount_minor))
            .collect();

        Self {
            action_type,
            terminal_id: terminal_id.into(),
            acquirer_id: acquirer_id.into(),
            created: created.into(),
            client_id: client_id.into(),
            rrn: Some(rrn.into()),
            total_amount: Some(amount_minor.to_string()),
            additional_data: Some(AdditionalData {
                products,
                total_p_cost: amount_minor.to_string(),
            }),
            currency: Some("986".to_string()),
            auth_code: Some("NUB445".to_string()),
        }
    }

    /// Build a balance query (action type 3): no rrn, no amount, no products.
    #[must_use]
    pub fn balance(
        terminal_id: impl Into<String>,
        acquirer_id: impl Into<String>,
        created: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            action_type: ActionType::BalanceQuery,
            terminal_id: terminal_id.into(),
            acquirer_id: acquirer_id.into(),
            created: created.into(),
            client_id: client_id.into(),
            rrn: None,
            total_amount: None,
            additional_data: None,
            currency: None,
            auth_code: None,
        }
    }
}

/// The `additionalData` object of an action response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseData {
    /// Bonus granted by this action, in minor units.
    pub bonus: Option<String>,
    /// Customer balance after the action, in minor units.
    pub balance: Option<String>,
}

/// Action endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    /// Provider result code; `"00"` is approval.
    #[serde(rename = "resultCode")]
    pub result_code: Option<String>,
    /// The provider's echo of (or replacement for) our rrn.
    pub rrn: Option<String>,
    /// Bonus and balance, when returned.
    #[serde(rename = "additionalData")]
    pub additional_data: Option<ResponseData>,
    /// Provider error text, when any.
    pub error: Option<String>,
    /// Extra rejection detail, when any.
    pub details: Option<String>,
}
