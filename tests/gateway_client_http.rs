//! Integration tests for `HttpGatewayClient` against a local HTTP server.
//!
//! A throwaway axum server on an ephemeral port stands in for the gateway
//! and records what the client sends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};

use przelewy24_gateway::adapters::logging::RecordingEventLog;
use przelewy24_gateway::adapters::przelewy24::{HttpGatewayClient, HttpGatewayConfig};
use przelewy24_gateway::domain::payment::{GatewayError, MerchantSettings};
use przelewy24_gateway::ports::{GatewayClient, GatewayEndpoint};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    authorization: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone)]
struct FakeGateway {
    captured: Arc<Mutex<Vec<Captured>>>,
    status: StatusCode,
    response: String,
}

async fn record(
    State(fake): State<FakeGateway>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    fake.captured.lock().unwrap().push(Captured {
        method,
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });
    (fake.status, fake.response.clone())
}

/// Starts a fake gateway and returns its base URL and capture log.
async fn start(status: StatusCode, response: &str) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let fake = FakeGateway {
        captured: Arc::new(Mutex::new(Vec::new())),
        status,
        response: response.to_string(),
    };
    let captured = fake.captured.clone();

    let app = Router::new().fallback(record).with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

fn client(base_url: &str, debug: bool, log: Arc<RecordingEventLog>) -> HttpGatewayClient {
    let settings = MerchantSettings::new("1111", "2222", "api-key", "crc").with_debug(debug);
    let config = HttpGatewayConfig::from_settings(&settings)
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    HttpGatewayClient::new(config, log).unwrap()
}

/// `Basic base64("2222:api-key")`
const EXPECTED_AUTH: &str = "Basic MjIyMjphcGkta2V5";

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn register_is_posted_with_basic_auth() {
    let (base, captured) = start(StatusCode::OK, r#"{"data":{"token":"T-1"}}"#).await;
    let client = client(&base, false, Arc::new(RecordingEventLog::new()));

    let response = client
        .call(GatewayEndpoint::Register, &json!({"merchantId": 1111, "sessionId": "h"}))
        .await
        .unwrap();

    assert_eq!(response["data"]["token"], "T-1");
    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].method, Method::POST);
    assert_eq!(captured[0].path, "/api/v1/transaction/register");
    assert_eq!(captured[0].authorization.as_deref(), Some(EXPECTED_AUTH));
    assert_eq!(
        String::from_utf8(captured[0].body.clone()).unwrap(),
        r#"{"merchantId":1111,"sessionId":"h"}"#
    );
}

#[tokio::test]
async fn verify_is_put_with_json_body() {
    let (base, captured) = start(StatusCode::OK, r#"{"data":{"status":"success"}}"#).await;
    let client = client(&base, false, Arc::new(RecordingEventLog::new()));

    let response = client
        .call(GatewayEndpoint::Verify, &json!({"orderId": 5}))
        .await
        .unwrap();

    assert_eq!(response["data"]["status"], "success");
    let captured = captured.lock().unwrap();
    assert_eq!(captured[0].method, Method::PUT);
    assert_eq!(captured[0].path, "/api/v1/transaction/verify");
    let body: Value = serde_json::from_slice(&captured[0].body).unwrap();
    assert_eq!(body, json!({"orderId": 5}));
}

#[tokio::test]
async fn other_endpoints_are_bodiless_gets() {
    let (base, captured) = start(StatusCode::OK, r#"{"data":true}"#).await;
    let client = client(&base, false, Arc::new(RecordingEventLog::new()));

    client
        .call(GatewayEndpoint::from("testAccess"), &json!({"ignored": true}))
        .await
        .unwrap();

    let captured = captured.lock().unwrap();
    assert_eq!(captured[0].method, Method::GET);
    assert_eq!(captured[0].path, "/api/v1/testAccess");
    assert!(captured[0].body.is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (base, _) = start(StatusCode::UNAUTHORIZED, r#"{"error":"Incorrect authentication"}"#).await;
    let client = client(&base, false, Arc::new(RecordingEventLog::new()));

    let result = client.call(GatewayEndpoint::Register, &json!({})).await;

    match result {
        Err(GatewayError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Incorrect authentication"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (base, _) = start(StatusCode::OK, "<html>maintenance</html>").await;
    let client = client(&base, false, Arc::new(RecordingEventLog::new()));

    let result = client.call(GatewayEndpoint::Verify, &json!({})).await;

    assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
}

#[tokio::test]
async fn debug_trace_is_escaped_and_omits_credentials() {
    let (base, _) = start(StatusCode::OK, r#"{"data":{"token":"<b>T</b>"}}"#).await;
    let log = Arc::new(RecordingEventLog::new());
    let client = client(&base, true, log.clone());

    client
        .call(GatewayEndpoint::Register, &json!({"client": "O'Brien & Sons"}))
        .await
        .unwrap();

    let events = log.events();
    assert_eq!(events.len(), 1);
    let message = &events[0].message;
    assert!(message.contains("/api/v1/transaction/register"));
    assert!(message.contains("&lt;b&gt;T&lt;/b&gt;"));
    assert!(message.contains("O&#039;Brien &amp; Sons"));
    assert!(!message.contains("api-key"));
    assert!(!message.contains(EXPECTED_AUTH));
}

#[tokio::test]
async fn no_trace_without_debug() {
    let (base, _) = start(StatusCode::OK, r#"{"data":{}}"#).await;
    let log = Arc::new(RecordingEventLog::new());
    let client = client(&base, false, log.clone());

    client.call(GatewayEndpoint::Register, &json!({})).await.unwrap();

    assert!(log.is_empty());
}

#[tokio::test]
async fn debug_trace_records_transport_errors() {
    let log = Arc::new(RecordingEventLog::new());
    let client = client("http://127.0.0.1:1", true, log.clone());

    let result = client.call(GatewayEndpoint::Verify, &json!({})).await;

    assert!(matches!(result, Err(GatewayError::Transport(_))));
    let events = log.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].message.contains("Error: <pre>"));
}
