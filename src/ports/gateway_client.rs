//! Gateway client port - outbound calls to the payment gateway REST API.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::payment::GatewayError;

/// Gateway API operation, relative to `/api/v1/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEndpoint {
    /// `transaction/register`, sent as POST with a JSON body.
    Register,

    /// `transaction/verify`, sent as PUT with a JSON body.
    Verify,

    /// Any other operation, sent as a bodiless GET.
    Other(String),
}

impl GatewayEndpoint {
    pub fn path(&self) -> &str {
        match self {
            GatewayEndpoint::Register => "transaction/register",
            GatewayEndpoint::Verify => "transaction/verify",
            GatewayEndpoint::Other(path) => path,
        }
    }
}

impl From<&str> for GatewayEndpoint {
    fn from(path: &str) -> Self {
        match path {
            "transaction/register" => GatewayEndpoint::Register,
            "transaction/verify" => GatewayEndpoint::Verify,
            other => GatewayEndpoint::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for GatewayEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Port for the gateway REST client.
///
/// A single attempt per call; no retries.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Call an endpoint and return the parsed JSON response.
    async fn call(&self, endpoint: GatewayEndpoint, payload: &Value) -> Result<Value, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_round_trip_through_names() {
        assert_eq!(GatewayEndpoint::from("transaction/register"), GatewayEndpoint::Register);
        assert_eq!(GatewayEndpoint::from("transaction/verify"), GatewayEndpoint::Verify);
        assert_eq!(
            GatewayEndpoint::from("testAccess"),
            GatewayEndpoint::Other("testAccess".to_string())
        );
        assert_eq!(GatewayEndpoint::Verify.to_string(), "transaction/verify");
    }

    #[test]
    fn gateway_client_is_object_safe() {
        fn _accepts_dyn(_client: &dyn GatewayClient) {}
    }
}
