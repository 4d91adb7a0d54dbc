//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CompanyId, CustomerId};

/// A per-tenant customer record, keyed by `(company_id, client_code)`.
///
/// Created lazily on first contact and never deleted by the transaction
/// path. `last_balance` is a cache of the most recent balance the provider
/// returned, not a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Record id.
    pub id: CustomerId,

    /// Owning tenant.
    pub company_id: CompanyId,

    /// The canonical provider-facing code (`"0e…"`, `"0f…"`, or raw QR).
    pub client_code: String,

    /// The raw identifier the code was derived from, kept for lookup only.
    pub seed: Option<String>,

    /// Last balance the provider reported, in minor units.
    pub last_balance: Option<String>,

    /// When the provider last reported for this customer.
    pub last_transaction_at: Option<DateTime<Utc>>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Create a fresh record for first contact.
    #[must_use]
    pub fn new(company_id: CompanyId, client_code: impl Into<String>, seed: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::generate(),
            company_id,
            client_code: client_code.into(),
            seed,
            last_balance: None,
            last_transaction_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
