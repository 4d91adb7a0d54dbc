//! Key encoding for the column families.
//!
//! Composite keys concatenate the fixed-width tenant UUID (16 bytes) with a
//! variable suffix, so a tenant prefix scan never crosses into another
//! tenant's rows.

use ponto_core::{AttemptId, CompanyId, CustomerId};

/// Key for a tenant's connection profile.
#[must_use]
pub fn config_key(company_id: &CompanyId) -> Vec<u8> {
    company_id.as_bytes().to_vec()
}

/// Key for a terminal record: `company_id (16) || terminal_id`.
#[must_use]
pub fn terminal_key(company_id: &CompanyId, terminal_id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(16 + terminal_id.len());
    key.extend_from_slice(company_id.as_bytes());
    key.extend_from_slice(terminal_id.as_bytes());
    key
}

/// Key for a customer record: `company_id (16) || client_code`.
#[must_use]
pub fn customer_key(company_id: &CompanyId, client_code: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(16 + client_code.len());
    key.extend_from_slice(company_id.as_bytes());
    key.extend_from_slice(client_code.as_bytes());
    key
}

/// Key for the customer-id index.
#[must_use]
pub fn customer_id_key(customer_id: &CustomerId) -> Vec<u8> {
    customer_id.as_bytes().to_vec()
}

/// Key for a ledger row.
#[must_use]
pub fn attempt_key(attempt_id: &AttemptId) -> Vec<u8> {
    attempt_id.to_bytes().to_vec()
}

/// Key for the company-ledger index: `company_id (16) || attempt_id (16)`.
///
/// Attempt ids are ULIDs, so rows under one tenant prefix sort by time.
#[must_use]
pub fn company_attempt_key(company_id: &CompanyId, attempt_id: &AttemptId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(company_id.as_bytes());
    key.extend_from_slice(&attempt_id.to_bytes());
    key
}

/// Prefix for scanning a tenant's ledger index.
#[must_use]
pub fn company_attempts_prefix(company_id: &CompanyId) -> Vec<u8> {
    company_id.as_bytes().to_vec()
}

/// Extract the attempt id from a company-ledger index key.
///
/// # Panics
///
/// Panics if the key is shorter than 32 bytes.
#[must_use]
pub fn extract_attempt_id(key: &[u8]) -> AttemptId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    AttemptId::from_bytes(bytes).expect("valid ULID bytes")
}
