//! Connection-profile endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use ponto_store::Store;
use serde_json::json;

fn profile_body(host: &str) -> serde_json::Value {
    json!({
        "host": host,
        "terminal_id": "bemL001",
        "acquirer_id": "L2Flow",
        "aid_pass": "terminal-password",
        "transaction_endpoint": "/api/transaction",
        "token_endpoint": "/api/token",
        "use_fixed_amount": false,
    })
}

#[tokio::test]
async fn get_config_before_set_is_not_found() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/v1/config")
        .add_header("authorization", harness.operator_auth())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn put_config_requires_admin() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .put("/v1/config")
        .add_header("authorization", harness.operator_auth())
        .json(&profile_body("https://api.provider.example"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn put_config_validates_profile() {
    let harness = TestHarness::new().await;

    let mut body = profile_body("https://api.provider.example");
    body["acquirer_id"] = json!("");

    let response = harness
        .server
        .put("/v1/config")
        .add_header("authorization", harness.admin_auth())
        .json(&body)
        .await;

    response.assert_status_bad_request();
    let error: serde_json::Value = response.json();
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("acquirer_id"));
}

#[tokio::test]
async fn put_then_get_redacts_password() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .put("/v1/config")
        .add_header("authorization", harness.admin_auth())
        .json(&profile_body("https://api.provider.example"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["config"]["aid_pass"], "***REDACTED***");

    let response = harness
        .server
        .get("/v1/config")
        .add_header("authorization", harness.operator_auth())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["config"]["aid_pass"], "***REDACTED***");
    assert_eq!(body["config"]["terminal_id"], "bemL001");

    // The stored profile keeps the real password for provider calls.
    let stored = harness
        .store
        .get_config(&harness.company_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.config.aid_pass, "terminal-password");
}

#[tokio::test]
async fn config_is_tenant_scoped() {
    let harness = TestHarness::new().await;

    harness
        .server
        .put("/v1/config")
        .add_header("authorization", harness.admin_auth())
        .json(&profile_body("https://api.provider.example"))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/config")
        .add_header("authorization", harness.other_tenant_auth())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn config_without_auth_fails() {
    let harness = TestHarness::new().await;

    harness.server.get("/v1/config").await.assert_status_unauthorized();
}
