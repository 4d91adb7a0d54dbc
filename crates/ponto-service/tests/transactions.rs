//! Transaction flow integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use ponto_store::Store;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, ResponseTemplate};

/// Mount a token endpoint that issues `"jwt-test"`.
async fn mount_token(harness: &TestHarness) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-test"})))
        .mount(&harness.provider)
        .await;
}

// ============================================================================
// Sales
// ============================================================================

#[tokio::test]
async fn sale_approved_writes_one_ledger_row_and_caches_balance() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();
    mount_token(&harness).await;

    Mock::given(method("POST"))
        .and(path("/api/transaction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "00",
            "rrn": "9999111815304578",
            "additionalData": {"bonus": "15", "balance": "300"},
        })))
        .expect(1)
        .mount(&harness.provider)
        .await;

    let response = harness
        .server
        .post("/v1/transactions")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "qr", "value": "0eabc123"},
            "amount": "15,50",
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["resultCode"], "00");
    assert_eq!(body["rrn"], "9999111815304578");
    assert_eq!(body["bonus"], "15");
    assert_eq!(body["balance"], "300");
    assert_eq!(body["totalAmount"], "1550");

    let ledger = harness.ledger();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].result_code, "00");
    assert_eq!(ledger[0].total_amount_minor, "1550");
    assert_eq!(ledger[0].rrn, "9999111815304578");
    assert!(ledger[0].customer_id.is_some());

    // Approval with a balance refreshes the customer's cache.
    let customer = harness
        .store
        .get_customer(&harness.company_id, "0eabc123")
        .unwrap()
        .unwrap();
    assert_eq!(customer.last_balance.as_deref(), Some("300"));
}

#[tokio::test]
async fn sale_rejected_returns_422_and_ledgers_exactly_once() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();
    mount_token(&harness).await;

    Mock::given(method("POST"))
        .and(path("/api/transaction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "51",
            "rrn": "2025111815304578",
        })))
        .mount(&harness.provider)
        .await;

    let response = harness
        .server
        .post("/v1/transactions")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "phone", "value": "61999887766"},
            "amount": "10",
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "transaction_rejected");
    assert_eq!(body["error"]["details"]["resultCode"], "51");

    let ledger = harness.ledger();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].result_code, "51");
    assert!(ledger[0]
        .error_message
        .as_deref()
        .unwrap()
        .contains("51"));
}

#[tokio::test]
async fn token_failure_returns_503_and_ledgers_nothing() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("terminal disabled"))
        .mount(&harness.provider)
        .await;

    let response = harness
        .server
        .post("/v1/transactions")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "qr", "value": "0eabc123"},
            "amount": "15,50",
        }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "token_unavailable");

    assert!(harness.ledger().is_empty());
}

#[tokio::test]
async fn provider_failure_returns_502_and_ledgers_error_row() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();
    mount_token(&harness).await;

    // Non-2xx with an unparseable body ledgers under "ERROR".
    Mock::given(method("POST"))
        .and(path("/api/transaction"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&harness.provider)
        .await;

    let response = harness
        .server
        .post("/v1/transactions")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "qr", "value": "0eabc123"},
            "amount": "15,50",
        }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);

    let ledger = harness.ledger();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].result_code, "ERROR");
    assert!(ledger[0].error_message.is_some());
    assert!(ledger[0].response_payload.is_some());
}

#[tokio::test]
async fn missing_terminal_returns_404_without_ledgering() {
    let harness = TestHarness::new().await;
    // Profile saved but no terminal registered.
    harness
        .store
        .set_config(&harness.company_id, &harness.provider_config())
        .unwrap();

    let response = harness
        .server
        .post("/v1/transactions")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "qr", "value": "0eabc123"},
            "amount": "15,50",
        }))
        .await;

    response.assert_status_not_found();
    assert!(harness.ledger().is_empty());
}

#[tokio::test]
async fn invalid_amount_rejected_before_any_network_call() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();
    // No provider mocks mounted: a request reaching the provider would 404.

    for bad in ["0", "-3,50", "abc"] {
        let response = harness
            .server
            .post("/v1/transactions")
            .add_header("authorization", harness.operator_auth())
            .json(&json!({
                "customer": {"kind": "qr", "value": "0eabc123"},
                "amount": bad,
            }))
            .await;
        response.assert_status_bad_request();
    }

    assert!(harness.ledger().is_empty());
}

#[tokio::test]
async fn invalid_phone_length_rejected() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();

    let response = harness
        .server
        .post("/v1/transactions")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "phone", "value": "12345678"},
            "amount": "10",
        }))
        .await;

    response.assert_status_bad_request();
    assert!(harness.ledger().is_empty());
}

#[tokio::test]
async fn transaction_without_auth_fails() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/transactions")
        .json(&json!({
            "customer": {"kind": "qr", "value": "0eabc123"},
            "amount": "10",
        }))
        .await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Balance queries
// ============================================================================

#[tokio::test]
async fn balance_query_body_has_no_rrn_and_ledgers_none_rrn() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();
    mount_token(&harness).await;

    Mock::given(method("POST"))
        .and(path("/api/transaction"))
        .and(|request: &Request| {
            let body: serde_json::Value =
                serde_json::from_slice(&request.body).expect("valid JSON body");
            body.get("rrn").is_none() && body["actionType"] == "3"
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "00",
            "additionalData": {"balance": "100"},
        })))
        .expect(1)
        .mount(&harness.provider)
        .await;

    let response = harness
        .server
        .post("/v1/balance")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "numeric_id", "value": "1234567"},
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], "100");
    assert_eq!(body["totalAmount"], "0");

    let ledger = harness.ledger();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].rrn, "NONE");
    assert_eq!(ledger[0].total_amount_minor, "0");
}

// ============================================================================
// Cashback
// ============================================================================

#[tokio::test]
async fn cashback_submits_action_type_eight() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();
    mount_token(&harness).await;

    Mock::given(method("POST"))
        .and(path("/api/transaction"))
        .and(|request: &Request| {
            let body: serde_json::Value =
                serde_json::from_slice(&request.body).expect("valid JSON body");
            body["actionType"] == "8"
                && body["currency"] == "986"
                && body["authCode"] == "NUB445"
                && body["rrn"].as_str().is_some_and(|r| r.len() == 16)
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "00",
            "additionalData": {"balance": "50"},
        })))
        .expect(1)
        .mount(&harness.provider)
        .await;

    let response = harness
        .server
        .post("/v1/cashback")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "customer": {"kind": "qr", "value": "0fabc123"},
            "amount": "2,50",
        }))
        .await;

    response.assert_status_ok();

    let ledger = harness.ledger();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].action_type.as_str(), "8");
    assert_eq!(ledger[0].total_amount_minor, "250");
}

// ============================================================================
// History and export
// ============================================================================

#[tokio::test]
async fn history_is_tenant_scoped_and_newest_first() {
    let harness = TestHarness::new().await;
    harness.seed_tenant();
    mount_token(&harness).await;

    Mock::given(method("POST"))
        .and(path("/api/transaction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "00",
            "rrn": "9999111815304578",
        })))
        .mount(&harness.provider)
        .await;

    for amount in ["1", "2"] {
        harness
            .server
            .post("/v1/transactions")
            .add_header("authorization", harness.operator_auth())
            .json(&json!({
                "customer": {"kind": "qr", "value": "0eabc123"},
                "amount": amount,
            }))
            .await
            .assert_status_ok();
    }

    let response = harness
        .server
        .get("/v1/transactions")
        .add_header("authorization", harness.operator_auth())
        .await;
    response.assert_status_ok();
    let rows: serde_json::Value = response.json();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["totalAmount"], "200"); // Newest first
    assert_eq!(rows[1]["totalAmount"], "100");

    // A different tenant sees nothing.
    let response = harness
        .server
        .get("/v1/transactions")
        .add_header("authorization", harness.other_tenant_auth())
        .await;
    response.assert_status_ok();
    let rows: serde_json::Value = response.json();
    assert!(rows.as_array().unwrap().is_empty());

    // Limit applies.
    let response = harness
        .server
        .get("/v1/transactions?limit=1")
        .add_header("authorization", harness.operator_auth())
        .await;
    let rows: serde_json::Value = response.json();
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn export_csv_returns_quoted_rows() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/transactions/export/csv")
        .add_header("authorization", harness.operator_auth())
        .json(&json!({
            "transactions": [{
                "created_at": "2025-11-18T15:30:45Z",
                "rrn": "2025111815304578",
                "resultCode": "00",
                "bonus": "15",
                "balance": "300",
            }]
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/csv"
    );
    let body = response.text();
    assert!(body.starts_with("Timestamp,RRN,Result Code,Bonus,Balance,Error Message\n"));
    assert!(body.contains("\"2025111815304578\""));
}
