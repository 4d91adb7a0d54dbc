//! Provider result-code taxonomy.
//!
//! The provider answers every action with a 2-digit `resultCode`. `"00"` is
//! approval; everything else is a rejection. The titles and descriptions here
//! are presentational — they drive operator-facing messaging, never control
//! flow. The only behavioral distinction is the retriable set: timeout and
//! system-error codes where "try again" is sensible advice.

/// The code the ledger records when the action endpoint failed at the
/// transport level and no provider code exists.
pub const TRANSPORT_ERROR_CODE: &str = "ERROR";

/// Approval code.
pub const APPROVED: &str = "00";

/// Human-readable details for a result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeInfo {
    /// Short operator-facing title.
    pub title: &'static str,
    /// One-line explanation.
    pub description: &'static str,
    /// Suggested operator action, when one exists.
    pub action: Option<&'static str>,
}

/// Whether a result code indicates an approved transaction.
#[must_use]
pub fn is_approved(result_code: &str) -> bool {
    result_code == APPROVED
}

/// Whether a rejection belongs to the timeout / system-error family where
/// retrying is reasonable. No automatic retry happens server-side; this only
/// feeds caller-side messaging.
#[must_use]
pub fn is_retriable(result_code: &str) -> bool {
    matches!(result_code, "19" | "91" | "92" | "96")
}

/// Look up the presentational details for a result code.
///
/// Unknown codes fall back to a generic entry so the terminal always has
/// something to show.
#[must_use]
pub fn describe(result_code: &str) -> CodeInfo {
    match result_code {
        "00" => CodeInfo {
            title: "Approved",
            description: "Points credited successfully",
            action: None,
        },
        "01" => CodeInfo {
            title: "Declined",
            description: "Contact support",
            action: Some("Check terminal configuration"),
        },
        "03" => CodeInfo {
            title: "Invalid merchant",
            description: "Terminal not authorized",
            action: Some("Check terminal configuration"),
        },
        "04" => CodeInfo {
            title: "Card retention",
            description: "Customer must contact the administrator",
            action: None,
        },
        "05" => CodeInfo {
            title: "Not approved",
            description: "Transaction not authorized",
            action: None,
        },
        "12" => CodeInfo {
            title: "Invalid transaction",
            description: "Check the submitted data",
            action: Some("Retry or contact support"),
        },
        "13" => CodeInfo {
            title: "Invalid amount",
            description: "The transaction amount is incorrect",
            action: Some("Check the product amount"),
        },
        "14" => CodeInfo {
            title: "Invalid card number",
            description: "Client ID not recognized",
            action: Some("Check the QR code or customer id"),
        },
        "15" => CodeInfo {
            title: "Issuer not found",
            description: "Loyalty system unavailable",
            action: None,
        },
        "19" => CodeInfo {
            title: "System error",
            description: "Try again",
            action: Some("Contact support if it persists"),
        },
        "25" => CodeInfo {
            title: "Transaction not found",
            description: "Record does not exist upstream",
            action: None,
        },
        "30" => CodeInfo {
            title: "Format error",
            description: "Transaction data malformed",
            action: Some("Check terminal configuration"),
        },
        "41" => CodeInfo {
            title: "Lost card",
            description: "Customer reported the card lost",
            action: None,
        },
        "43" => CodeInfo {
            title: "Stolen card",
            description: "Customer reported the card stolen",
            action: None,
        },
        "51" => CodeInfo {
            title: "Insufficient balance",
            description: "Customer does not have enough points",
            action: None,
        },
        "54" => CodeInfo {
            title: "Expired card",
            description: "Customer registration expired",
            action: None,
        },
        "55" => CodeInfo {
            title: "Incorrect PIN",
            description: "Invalid password",
            action: None,
        },
        "57" => CodeInfo {
            title: "Transaction not permitted",
            description: "This operation type is not allowed",
            action: None,
        },
        "58" => CodeInfo {
            title: "Terminal not authorized",
            description: "Terminal not configured correctly",
            action: Some("Check configuration"),
        },
        "61" => CodeInfo {
            title: "Limit exceeded",
            description: "Amount exceeds the transaction limit",
            action: None,
        },
        "62" => CodeInfo {
            title: "Restricted card",
            description: "The card has restrictions",
            action: None,
        },
        "63" => CodeInfo {
            title: "Security violation",
            description: "A security error was detected",
            action: None,
        },
        "65" => CodeInfo {
            title: "Transaction count exceeded",
            description: "Customer reached the daily or monthly limit",
            action: None,
        },
        "71" => CodeInfo {
            title: "Integration error",
            description: "The provider rejected the request format",
            action: Some("Check timestamps and request fields"),
        },
        "75" => CodeInfo {
            title: "PIN attempts exceeded",
            description: "Customer blocked after repeated attempts",
            action: None,
        },
        "76" => CodeInfo {
            title: "Account not found",
            description: "Customer not registered",
            action: Some("Check the customer id"),
        },
        "77" => CodeInfo {
            title: "Inconsistent account",
            description: "Customer data is inconsistent",
            action: None,
        },
        "78" => CodeInfo {
            title: "Account blocked",
            description: "The customer is blocked",
            action: None,
        },
        "91" => CodeInfo {
            title: "System unavailable",
            description: "Loyalty server offline",
            action: Some("Try again in a few minutes"),
        },
        "92" => CodeInfo {
            title: "Communication timeout",
            description: "No response from the server",
            action: Some("Check the internet connection"),
        },
        "94" => CodeInfo {
            title: "Duplicate transaction",
            description: "This transaction was already processed",
            action: None,
        },
        "96" => CodeInfo {
            title: "System failure",
            description: "Internal server error upstream",
            action: Some("Contact technical support"),
        },
        _ => CodeInfo {
            title: "Unknown error",
            description: "Unrecognized result code",
            action: Some("Contact technical support"),
        },
    }
}
