//! Terminal records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CompanyId, TerminalRecordId};

/// A physical or virtual POS terminal registered to a tenant.
///
/// `terminal_id` is the provider-facing identifier string; `id` is the
/// database key the ledger references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    /// Record id (ledger foreign key).
    pub id: TerminalRecordId,

    /// Owning tenant.
    pub company_id: CompanyId,

    /// Provider-facing terminal identifier, e.g. `"bemL001"`.
    pub terminal_id: String,

    /// Display name, e.g. `"Loja Centro"`.
    pub name: String,

    /// Inactive terminals are kept for audit but rejected for new attempts.
    pub is_active: bool,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Terminal {
    /// Register a new active terminal.
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        terminal_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: TerminalRecordId::generate(),
            company_id,
            terminal_id: terminal_id.into(),
            name: name.into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
