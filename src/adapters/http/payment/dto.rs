//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::CreatePaymentLinkResult;

/// Response carrying the URL the buyer must be redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLinkResponse {
    pub order_id: u64,
    pub provider: String,
    pub url: String,
}

impl From<CreatePaymentLinkResult> for PaymentLinkResponse {
    fn from(result: CreatePaymentLinkResult) -> Self {
        Self {
            order_id: result.order_id.value(),
            provider: result.provider.to_string(),
            url: result.url,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}
