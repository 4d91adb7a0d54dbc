//! `RocksDB` storage layer for the ponto loyalty platform.
//!
//! This crate persists tenant configuration, terminals, customers, and the
//! transaction ledger using `RocksDB` with column families:
//!
//! - `configs`: connection profiles, keyed by `company_id`
//! - `terminals`: terminal records, keyed by `company_id || terminal_id`
//! - `customers` / `customers_by_id`: customer records and the id index
//! - `attempts` / `attempts_by_company`: append-only ledger rows (ULID keys)
//!   and the per-tenant listing index
//!
//! # Example
//!
//! ```no_run
//! use ponto_store::{RocksStore, Store};
//! use ponto_core::{CompanyId, Terminal};
//!
//! let store = RocksStore::open("/tmp/ponto-db").unwrap();
//!
//! let company = CompanyId::generate();
//! let terminal = Terminal::new(company, "bemL001", "Loja Centro");
//! store.put_terminal(&terminal).unwrap();
//!
//! let found = store.find_terminal(&company, "bemL001").unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use ponto_core::{
    AttemptId, CompanyId, Configuration, Customer, CustomerId, StoredConfiguration, Terminal,
    TransactionAttempt,
};

/// The storage trait defining all database operations.
///
/// This abstracts the storage layer so the orchestrator can be exercised
/// against different implementations.
pub trait Store: Send + Sync {
    // =========================================================================
    // Configuration
    // =========================================================================

    /// Save a tenant's connection profile, preserving the original
    /// `created_at` on overwrite.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn set_config(
        &self,
        company_id: &CompanyId,
        config: &Configuration,
    ) -> Result<StoredConfiguration>;

    /// Get a tenant's connection profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_config(&self, company_id: &CompanyId) -> Result<Option<StoredConfiguration>>;

    // =========================================================================
    // Terminals
    // =========================================================================

    /// Insert or update a terminal record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_terminal(&self, terminal: &Terminal) -> Result<()>;

    /// Find a terminal by tenant and provider-facing terminal id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_terminal(&self, company_id: &CompanyId, terminal_id: &str)
        -> Result<Option<Terminal>>;

    // =========================================================================
    // Customers
    // =========================================================================

    /// Find the customer for `(company_id, client_code)`, creating the record
    /// on first contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_or_create_customer(
        &self,
        company_id: &CompanyId,
        client_code: &str,
        seed: Option<&str>,
    ) -> Result<Customer>;

    /// Get a customer by tenant and client code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_customer(&self, company_id: &CompanyId, client_code: &str) -> Result<Option<Customer>>;

    /// Update a customer's cached balance and last-transaction time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the customer doesn't exist.
    fn update_customer_balance(&self, customer_id: &CustomerId, balance: &str) -> Result<()>;

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Append a ledger row. Rows are immutable; this also maintains the
    /// per-tenant listing index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn save_attempt(&self, attempt: &TransactionAttempt) -> Result<AttemptId>;

    /// Get a ledger row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_attempt(&self, attempt_id: &AttemptId) -> Result<Option<TransactionAttempt>>;

    /// List a tenant's ledger rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_attempts(&self, company_id: &CompanyId, limit: usize)
        -> Result<Vec<TransactionAttempt>>;
}
