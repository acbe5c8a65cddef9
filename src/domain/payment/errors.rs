//! Error types for payment link creation and callback handling.

use thiserror::Error;

use crate::domain::foundation::{DomainError, PaymentHash};

/// Failures of an outbound gateway call.
///
/// Callers treat every variant as "inconclusive": the payment link is
/// unavailable, or the verification could not be completed.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Connection, TLS or timeout failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Gateway answered with a non-2xx status.
    #[error("Gateway returned HTTP {status}")]
    Status { status: u16, body: String },

    /// Response body was not valid JSON.
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Failure to load a payment session by hash.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("Payment \"{0}\" not found")]
    NotFound(PaymentHash),

    #[error("Payment lookup failed: {0}")]
    Storage(String),
}

impl From<DomainError> for LookupError {
    fn from(err: DomainError) -> Self {
        LookupError::Storage(err.to_string())
    }
}

/// Reasons a callback ends in the rejected state.
///
/// None of these reach the transport layer as faults; the processor turns
/// each into an inert response.
#[derive(Debug, Clone, Error)]
pub enum CallbackError {
    /// Bad hash shape, missing required fields, or a body that is not a JSON object.
    #[error("Malformed callback: {0}")]
    MalformedCallback(String),

    #[error("Notification signature mismatch")]
    SignatureMismatch,

    #[error("Gateway verification inconclusive: {0}")]
    GatewayTransportFailure(#[from] GatewayError),

    #[error("Gateway verification failed (status: {})", .status.as_deref().unwrap_or("none"))]
    GatewayVerificationFailed { status: Option<String> },

    #[error("Payment \"{0}\" not found")]
    SessionNotFound(PaymentHash),

    /// Lookup or apply raised an error in the order collaborator.
    #[error("Payment process failed: {0}")]
    ProcessingFailed(String),
}

impl CallbackError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        CallbackError::MalformedCallback(reason.into())
    }

    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CallbackError::MalformedCallback(_) => "malformed_callback",
            CallbackError::SignatureMismatch => "signature_mismatch",
            CallbackError::GatewayTransportFailure(_) => "gateway_transport_failure",
            CallbackError::GatewayVerificationFailed { .. } => "gateway_verification_failed",
            CallbackError::SessionNotFound(_) => "session_not_found",
            CallbackError::ProcessingFailed(_) => "processing_failed",
        }
    }
}

impl From<LookupError> for CallbackError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(hash) => CallbackError::SessionNotFound(hash),
            LookupError::Storage(message) => CallbackError::ProcessingFailed(message),
        }
    }
}

/// Failures while producing a payment link.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    /// Client credentials are not configured.
    #[error("Missing client credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("Order error: {0}")]
    Order(#[from] DomainError),

    /// Order data could not be expressed in the gateway's wire format.
    #[error("Invalid request data: {0}")]
    InvalidRequest(String),

    #[error("Payment link unavailable: {0}")]
    Gateway(#[from] GatewayError),

    /// Registration succeeded at transport level but carried no token.
    #[error("Payment link unavailable: registration returned no token")]
    MissingToken,
}

impl PaymentError {
    /// Whether this error stems from merchant configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PaymentError::MissingCredentials(_) | PaymentError::InvalidSetting { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn lookup_not_found_maps_to_session_not_found() {
        let hash = PaymentHash::new("abc").unwrap();
        let err: CallbackError = LookupError::NotFound(hash.clone()).into();
        assert!(matches!(err, CallbackError::SessionNotFound(h) if h == hash));
    }

    #[test]
    fn lookup_storage_maps_to_processing_failed() {
        let err: CallbackError = LookupError::Storage("db down".to_string()).into();
        assert_eq!(err.kind(), "processing_failed");
        assert_eq!(err.to_string(), "Payment process failed: db down");
    }

    #[test]
    fn verification_failed_displays_status() {
        let err = CallbackError::GatewayVerificationFailed {
            status: Some("error".to_string()),
        };
        assert_eq!(err.to_string(), "Gateway verification failed (status: error)");

        let err = CallbackError::GatewayVerificationFailed { status: None };
        assert_eq!(err.to_string(), "Gateway verification failed (status: none)");
    }

    #[test]
    fn missing_credentials_lists_keys() {
        let err = PaymentError::MissingCredentials(vec!["posId", "secretId"]);
        assert_eq!(err.to_string(), "Missing client credentials: posId, secretId");
        assert!(err.is_configuration());
    }

    #[test]
    fn order_errors_are_not_configuration() {
        let err: PaymentError = DomainError::new(ErrorCode::OrderNotFound, "missing").into();
        assert!(!err.is_configuration());
    }
}
