//! Application state.

use std::sync::Arc;

use ponto_store::RocksStore;
use ponto_upstream::UpstreamClient;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// The loyalty provider client.
    pub upstream: UpstreamClient,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, upstream: UpstreamClient, config: ServiceConfig) -> Self {
        Self {
            store,
            upstream,
            config,
        }
    }
}
