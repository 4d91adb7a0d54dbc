//! Offline transaction queue.
//!
//! Terminals keep selling when the network is down: monetary transactions
//! are persisted locally and replayed strictly in order once connectivity
//! returns. Head-of-line blocking is deliberate — replaying out of order
//! would reorder a customer's balance history.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ponto_core::{Configuration, Product};

use crate::error::TerminalError;
use crate::storage::StateStore;

const QUEUE_KEY: &str = "offline_transaction_queue";
const MAX_RETRIES: u32 = 3;

/// A transaction captured while offline, with everything needed to replay it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedTransaction {
    /// Queue entry id.
    pub id: Uuid,
    /// The canonical client code the sale was captured under.
    pub client_code: String,
    /// Snapshot of the connection profile at capture time.
    pub config: Configuration,
    /// Product line items.
    pub products: Vec<Product>,
    /// Major-unit amount string, when the operator entered one.
    pub amount: Option<String>,
    /// When the transaction was captured.
    pub queued_at: DateTime<Utc>,
    /// Delivery failures so far.
    pub retry_count: u32,
}

/// Delivery of a queued transaction to the service.
#[async_trait]
pub trait Deliver: Send + Sync {
    /// Attempt to deliver one queued transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when delivery fails; the queue increments the entry's
    /// retry count and stops the pass.
    async fn deliver(&self, transaction: &QueuedTransaction) -> Result<(), TerminalError>;
}

#[async_trait]
impl Deliver for crate::client::TerminalClient {
    async fn deliver(&self, transaction: &QueuedTransaction) -> Result<(), TerminalError> {
        // The captured client code is already canonical, so it replays as a
        // passthrough identifier.
        let customer = crate::client::CustomerRef::Qr(transaction.client_code.clone());
        self.sale(
            &customer,
            transaction.amount.as_deref(),
            &transaction.products,
        )
        .await?;
        Ok(())
    }
}

/// FIFO offline queue with persistent entries and bounded retries.
pub struct OfflineQueue {
    store: Arc<dyn StateStore>,
    deliver: Arc<dyn Deliver>,
    // Serializes load-modify-save cycles against the store.
    state: Mutex<()>,
    online: AtomicBool,
    in_progress: AtomicBool,
}

impl OfflineQueue {
    /// Create a queue over the given storage and delivery mechanism.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>, deliver: Arc<dyn Deliver>, online: bool) -> Self {
        Self {
            store,
            deliver,
            state: Mutex::new(()),
            online: AtomicBool::new(online),
            in_progress: AtomicBool::new(false),
        }
    }

    /// Capture a transaction for later delivery. Persists before any network
    /// I/O; if the terminal believes it is online, a delivery pass is
    /// triggered immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be persisted.
    pub async fn enqueue(
        &self,
        client_code: impl Into<String>,
        config: Configuration,
        products: Vec<Product>,
        amount: Option<String>,
    ) -> Result<Uuid, TerminalError> {
        let transaction = QueuedTransaction {
            id: Uuid::new_v4(),
            client_code: client_code.into(),
            config,
            products,
            amount,
            queued_at: Utc::now(),
            retry_count: 0,
        };
        let id = transaction.id;

        {
            let _guard = self.lock()?;
            let mut queue = self.load_queue()?;
            queue.push(transaction);
            self.save_queue(&queue)?;
        }

        tracing::debug!(id = %id, "transaction queued");

        if self.is_online() {
            self.process_all().await;
        }

        Ok(id)
    }

    /// Replay queued transactions in FIFO order, one at a time.
    ///
    /// Reentrant calls no-op while a pass is running. The pass stops at the
    /// first delivery failure after bumping the head's retry count; an entry
    /// that fails three times is dropped.
    pub async fn process_all(&self) {
        if self.in_progress.swap(true, Ordering::SeqCst) {
            return;
        }

        self.run_pass().await;

        self.in_progress.store(false, Ordering::SeqCst);
    }

    async fn run_pass(&self) {
        loop {
            if !self.is_online() {
                return;
            }

            let head = {
                let Ok(_guard) = self.lock() else { return };
                match self.load_queue() {
                    Ok(queue) => match queue.first() {
                        Some(head) => head.clone(),
                        None => return,
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "failed to load offline queue");
                        return;
                    }
                }
            };

            let delivered = self.deliver.deliver(&head).await;

            let Ok(_guard) = self.lock() else { return };
            let Ok(mut queue) = self.load_queue() else {
                return;
            };
            // The head may have been cleared concurrently.
            if queue.first().map(|t| t.id) != Some(head.id) {
                continue;
            }

            match delivered {
                Ok(()) => {
                    queue.remove(0);
                    if self.save_queue(&queue).is_err() {
                        return;
                    }
                    tracing::info!(id = %head.id, "queued transaction delivered");
                }
                Err(e) => {
                    queue[0].retry_count += 1;
                    if queue[0].retry_count >= MAX_RETRIES {
                        let dropped = queue.remove(0);
                        tracing::warn!(
                            id = %dropped.id,
                            retries = dropped.retry_count,
                            "dropping queued transaction after retry ceiling"
                        );
                    } else {
                        tracing::warn!(
                            id = %head.id,
                            error = %e,
                            "queued delivery failed, will retry"
                        );
                    }
                    let _ = self.save_queue(&queue);
                    return; // Stop the pass on failure.
                }
            }
        }
    }

    /// Update connectivity. Coming online triggers a delivery pass.
    pub async fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        if online {
            self.process_all().await;
        }
    }

    /// Whether the terminal currently believes it is online.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Number of pending entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be loaded.
    pub fn len(&self) -> Result<usize, TerminalError> {
        let _guard = self.lock()?;
        Ok(self.load_queue()?.len())
    }

    /// Whether the queue is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be loaded.
    pub fn is_empty(&self) -> Result<bool, TerminalError> {
        Ok(self.len()? == 0)
    }

    /// A snapshot of the pending entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be loaded.
    pub fn snapshot(&self) -> Result<Vec<QueuedTransaction>, TerminalError> {
        let _guard = self.lock()?;
        self.load_queue()
    }

    /// Drop all pending entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be persisted.
    pub fn clear(&self) -> Result<(), TerminalError> {
        let _guard = self.lock()?;
        self.store.remove(QUEUE_KEY)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, TerminalError> {
        self.state
            .lock()
            .map_err(|e| TerminalError::Storage(e.to_string()))
    }

    fn load_queue(&self) -> Result<Vec<QueuedTransaction>, TerminalError> {
        match self.store.load(QUEUE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_queue(&self, queue: &[QueuedTransaction]) -> Result<(), TerminalError> {
        self.store.save(QUEUE_KEY, &serde_json::to_string(queue)?)
    }
}
