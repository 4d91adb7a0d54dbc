//! `RocksDB` storage implementation.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use ponto_core::{
    AttemptId, CompanyId, Configuration, Customer, CustomerId, StoredConfiguration, Terminal,
    TransactionAttempt,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let path = path.as_ref();
        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(path = %path.display(), "opened database");

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn get_cf_value<T: serde::de::DeserializeOwned>(
        &self,
        cf_name: &str,
        key: &[u8],
    ) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Configuration
    // =========================================================================

    fn set_config(
        &self,
        company_id: &CompanyId,
        config: &Configuration,
    ) -> Result<StoredConfiguration> {
        let key = keys::config_key(company_id);
        let now = chrono::Utc::now();

        let created_at = self
            .get_cf_value::<StoredConfiguration>(cf::CONFIGS, &key)?
            .map_or(now, |existing| existing.created_at);

        let stored = StoredConfiguration {
            config: config.clone(),
            created_at,
            updated_at: now,
        };

        let cf = self.cf(cf::CONFIGS)?;
        let value = Self::serialize(&stored)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(stored)
    }

    fn get_config(&self, company_id: &CompanyId) -> Result<Option<StoredConfiguration>> {
        self.get_cf_value(cf::CONFIGS, &keys::config_key(company_id))
    }

    // =========================================================================
    // Terminals
    // =========================================================================

    fn put_terminal(&self, terminal: &Terminal) -> Result<()> {
        let cf = self.cf(cf::TERMINALS)?;
        let key = keys::terminal_key(&terminal.company_id, &terminal.terminal_id);
        let value = Self::serialize(terminal)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn find_terminal(
        &self,
        company_id: &CompanyId,
        terminal_id: &str,
    ) -> Result<Option<Terminal>> {
        self.get_cf_value(cf::TERMINALS, &keys::terminal_key(company_id, terminal_id))
    }

    // =========================================================================
    // Customers
    // =========================================================================

    fn find_or_create_customer(
        &self,
        company_id: &CompanyId,
        client_code: &str,
        seed: Option<&str>,
    ) -> Result<Customer> {
        if let Some(existing) = self.get_customer(company_id, client_code)? {
            return Ok(existing);
        }

        let customer = Customer::new(*company_id, client_code, seed.map(str::to_string));

        let cf_customers = self.cf(cf::CUSTOMERS)?;
        let cf_by_id = self.cf(cf::CUSTOMERS_BY_ID)?;

        let primary_key = keys::customer_key(company_id, client_code);
        let value = Self::serialize(&customer)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_customers, &primary_key, &value);
        batch.put_cf(&cf_by_id, keys::customer_id_key(&customer.id), &primary_key);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(customer)
    }

    fn get_customer(&self, company_id: &CompanyId, client_code: &str) -> Result<Option<Customer>> {
        self.get_cf_value(cf::CUSTOMERS, &keys::customer_key(company_id, client_code))
    }

    fn update_customer_balance(&self, customer_id: &CustomerId, balance: &str) -> Result<()> {
        let cf_by_id = self.cf(cf::CUSTOMERS_BY_ID)?;
        let primary_key = self
            .db
            .get_cf(&cf_by_id, keys::customer_id_key(customer_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound {
                entity: "customer",
                id: customer_id.to_string(),
            })?;

        let cf_customers = self.cf(cf::CUSTOMERS)?;
        let mut customer: Customer = self
            .db
            .get_cf(&cf_customers, &primary_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()?
            .ok_or_else(|| StoreError::NotFound {
                entity: "customer",
                id: customer_id.to_string(),
            })?;

        let now = chrono::Utc::now();
        customer.last_balance = Some(balance.to_string());
        customer.last_transaction_at = Some(now);
        customer.updated_at = now;

        let value = Self::serialize(&customer)?;
        self.db
            .put_cf(&cf_customers, primary_key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    fn save_attempt(&self, attempt: &TransactionAttempt) -> Result<AttemptId> {
        let cf_attempts = self.cf(cf::ATTEMPTS)?;
        let cf_by_company = self.cf(cf::ATTEMPTS_BY_COMPANY)?;

        let attempt_key = keys::attempt_key(&attempt.id);
        let index_key = keys::company_attempt_key(&attempt.company_id, &attempt.id);
        let value = Self::serialize(attempt)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_attempts, &attempt_key, &value);
        batch.put_cf(&cf_by_company, &index_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(attempt.id)
    }

    fn get_attempt(&self, attempt_id: &AttemptId) -> Result<Option<TransactionAttempt>> {
        self.get_cf_value(cf::ATTEMPTS, &keys::attempt_key(attempt_id))
    }

    fn list_attempts(
        &self,
        company_id: &CompanyId,
        limit: usize,
    ) -> Result<Vec<TransactionAttempt>> {
        let cf_by_company = self.cf(cf::ATTEMPTS_BY_COMPANY)?;
        let prefix = keys::company_attempts_prefix(company_id);

        let iter = self.db.iterator_cf(
            &cf_by_company,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // ULID keys scan oldest-first within the tenant prefix; collect then
        // reverse for newest-first.
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            all_keys.push(key.to_vec());
        }
        all_keys.reverse();

        let mut attempts = Vec::new();
        for key in all_keys.into_iter().take(limit) {
            let attempt_id = keys::extract_attempt_id(&key);
            if let Some(attempt) = self.get_attempt(&attempt_id)? {
                attempts.push(attempt);
            }
        }

        Ok(attempts)
    }
}
