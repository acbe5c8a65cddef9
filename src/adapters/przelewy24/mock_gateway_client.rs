//! Mock gateway client for testing.
//!
//! Supports:
//! - Pre-configured responses per endpoint
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::payment::GatewayError;
use crate::ports::{GatewayClient, GatewayEndpoint};

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCall {
    pub endpoint: GatewayEndpoint,
    pub payload: Value,
}

#[derive(Default)]
struct MockState {
    responses: HashMap<String, Value>,
    errors: HashMap<String, GatewayError>,
    call_log: Vec<GatewayCall>,
}

/// Mock `GatewayClient`.
///
/// Endpoints without a configured response answer with an empty object.
///
/// # Example
///
/// ```ignore
/// let mock = MockGatewayClient::new();
/// mock.respond(GatewayEndpoint::Register, json!({"data": {"token": "T"}}));
/// mock.fail(GatewayEndpoint::Verify, GatewayError::Transport("down".into()));
/// ```
#[derive(Default, Clone)]
pub struct MockGatewayClient {
    inner: Arc<Mutex<MockState>>,
}

impl MockGatewayClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the response for an endpoint, replacing any configured error.
    pub fn respond(&self, endpoint: GatewayEndpoint, response: Value) {
        let mut state = self.inner.lock().unwrap();
        state.errors.remove(endpoint.path());
        state.responses.insert(endpoint.path().to_string(), response);
    }

    /// Makes every call to the endpoint fail.
    pub fn fail(&self, endpoint: GatewayEndpoint, error: GatewayError) {
        self.inner
            .lock()
            .unwrap()
            .errors
            .insert(endpoint.path().to_string(), error);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn calls_to(&self, endpoint: &GatewayEndpoint) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|c| &c.endpoint == endpoint)
            .collect()
    }
}

#[async_trait]
impl GatewayClient for MockGatewayClient {
    async fn call(&self, endpoint: GatewayEndpoint, payload: &Value) -> Result<Value, GatewayError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(GatewayCall {
            endpoint: endpoint.clone(),
            payload: payload.clone(),
        });

        if let Some(error) = state.errors.get(endpoint.path()) {
            return Err(error.clone());
        }

        Ok(state
            .responses
            .get(endpoint.path())
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default())))
    }
}
