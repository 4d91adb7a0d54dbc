//! Common test utilities for ponto integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;
use wiremock::MockServer;

use ponto_core::{CompanyId, Configuration, Terminal, UserId};
use ponto_service::auth::{issue_token, Role};
use ponto_service::{create_router, AppState, ServiceConfig};
use ponto_store::{RocksStore, Store};
use ponto_upstream::UpstreamClient;

const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct store handle for seeding and assertions.
    pub store: Arc<RocksStore>,
    /// Mock loyalty provider.
    pub provider: MockServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// The tenant all seeded records belong to.
    pub company_id: CompanyId,
    /// A test operator for authenticated requests.
    pub operator_id: UserId,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and mock provider.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));
        let provider = MockServer::start().await;

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            jwt_secret: TEST_JWT_SECRET.into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::clone(&store), UpstreamClient::new(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            provider,
            _temp_dir: temp_dir,
            company_id: CompanyId::generate(),
            operator_id: UserId::generate(),
        }
    }

    /// Seed the tenant's connection profile, pointed at the mock provider,
    /// and register its terminal.
    pub fn seed_tenant(&self) {
        let config = self.provider_config();
        self.store
            .set_config(&self.company_id, &config)
            .expect("seed config");
        self.store
            .put_terminal(&Terminal::new(self.company_id, "bemL001", "Test Terminal"))
            .expect("seed terminal");
    }

    /// A valid connection profile pointing at the mock provider.
    pub fn provider_config(&self) -> Configuration {
        Configuration {
            host: self.provider.uri(),
            terminal_id: "bemL001".into(),
            acquirer_id: "L2Flow".into(),
            aid_pass: "terminal-password".into(),
            transaction_endpoint: "/api/transaction".into(),
            token_endpoint: "/api/token".into(),
            use_fixed_amount: false,
        }
    }

    /// Bearer header for the test operator.
    pub fn operator_auth(&self) -> String {
        let token = issue_token(
            TEST_JWT_SECRET,
            self.operator_id,
            self.company_id,
            Role::Operator,
            3600,
        )
        .expect("sign token");
        format!("Bearer {token}")
    }

    /// Bearer header for a tenant admin.
    pub fn admin_auth(&self) -> String {
        let token = issue_token(
            TEST_JWT_SECRET,
            UserId::generate(),
            self.company_id,
            Role::Admin,
            3600,
        )
        .expect("sign token");
        format!("Bearer {token}")
    }

    /// Bearer header for an operator of a different tenant.
    pub fn other_tenant_auth(&self) -> String {
        let token = issue_token(
            TEST_JWT_SECRET,
            UserId::generate(),
            CompanyId::generate(),
            Role::Operator,
            3600,
        )
        .expect("sign token");
        format!("Bearer {token}")
    }

    /// The tenant's ledger rows, newest first.
    pub fn ledger(&self) -> Vec<ponto_core::TransactionAttempt> {
        self.store
            .list_attempts(&self.company_id, 100)
            .expect("list attempts")
    }
}
