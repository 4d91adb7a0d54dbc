//! Column family definitions.

/// Column family names.
pub mod cf {
    /// Tenant connection profiles, keyed by `company_id`.
    pub const CONFIGS: &str = "configs";

    /// Terminal records, keyed by `company_id || terminal_id`.
    pub const TERMINALS: &str = "terminals";

    /// Customer records, keyed by `company_id || client_code`.
    pub const CUSTOMERS: &str = "customers";

    /// Index from `customer_id` to the primary customer key.
    pub const CUSTOMERS_BY_ID: &str = "customers_by_id";

    /// Ledger rows, keyed by `attempt_id` (ULID, time-ordered).
    pub const ATTEMPTS: &str = "attempts";

    /// Index for listing a tenant's ledger, keyed by
    /// `company_id || attempt_id`.
    pub const ATTEMPTS_BY_COMPANY: &str = "attempts_by_company";
}

/// All column families that must exist in the database.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::CONFIGS,
        cf::TERMINALS,
        cf::CUSTOMERS,
        cf::CUSTOMERS_BY_ID,
        cf::ATTEMPTS,
        cf::ATTEMPTS_BY_COMPANY,
    ]
}
