//! Inbound callback vocabulary: the request value object, the parsed
//! asynchronous notification, and the processing outcome.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use super::errors::CallbackError;
use super::signature::SignFields;
use crate::domain::foundation::PaymentHash;

/// Query parameter carrying the payment hash on the status URL.
pub const PAYMENT_HASH_PARAM: &str = "paymentHash";

/// Fields every asynchronous notification must carry.
pub const REQUIRED_NOTIFICATION_FIELDS: [&str; 10] = [
    "merchantId",
    "posId",
    "sessionId",
    "amount",
    "originAmount",
    "currency",
    "orderId",
    "methodId",
    "statement",
    "sign",
];

/// Inbound request on the status URL.
#[derive(Debug, Clone, Default)]
pub struct CallbackRequest {
    query: HashMap<String, String>,
    raw_body: Vec<u8>,
}

impl CallbackRequest {
    pub fn new(query: HashMap<String, String>, raw_body: impl Into<Vec<u8>>) -> Self {
        Self {
            query,
            raw_body: raw_body.into(),
        }
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    /// An empty body means the buyer was redirected back by the gateway.
    pub fn is_synchronous_return(&self) -> bool {
        self.raw_body.is_empty()
    }

    /// Extracts and validates the payment hash from the query string.
    pub fn payment_hash(&self) -> Result<PaymentHash, CallbackError> {
        let raw = self
            .query_param(PAYMENT_HASH_PARAM)
            .ok_or_else(|| CallbackError::malformed("missing paymentHash"))?;
        PaymentHash::new(raw).map_err(|e| CallbackError::malformed(e.to_string()))
    }
}

/// Asynchronous notification with every required field present.
///
/// Field order is kept as received because it feeds the signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    fields: SignFields,
}

impl Notification {
    /// Parses a notification body.
    ///
    /// A field holding JSON `null` counts as missing.
    pub fn parse(body: &[u8]) -> Result<Self, CallbackError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| CallbackError::malformed(format!("body is not valid JSON: {}", e)))?;

        let Value::Object(fields) = value else {
            return Err(CallbackError::malformed("body is not a JSON object"));
        };

        if let Some(missing) = REQUIRED_NOTIFICATION_FIELDS
            .iter()
            .find(|name| fields.get(**name).map_or(true, Value::is_null))
        {
            return Err(CallbackError::malformed(format!("missing field {}", missing)));
        }

        Ok(Self { fields })
    }

    /// All received fields, in received order, including `sign`.
    pub fn fields(&self) -> &SignFields {
        &self.fields
    }

    /// Raw received value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// `sessionId` as text, when it is a string.
    pub fn session_id(&self) -> Option<&str> {
        self.fields.get("sessionId").and_then(Value::as_str)
    }

    /// Received amount in minor units.
    pub fn amount_minor(&self) -> Result<i64, CallbackError> {
        let amount = self
            .fields
            .get("amount")
            .ok_or_else(|| CallbackError::malformed("missing field amount"))?;

        match amount {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| CallbackError::malformed("amount is not an integer"))
    }

    /// Received amount converted back to major units, two decimal places.
    pub fn amount(&self) -> Result<Decimal, CallbackError> {
        Ok(Decimal::new(self.amount_minor()?, 2))
    }
}

/// Buyer-facing page a callback can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingPage {
    Success,
    Failed,
}

impl LandingPage {
    pub fn path(&self) -> &'static str {
        match self {
            LandingPage::Success => "payment-success",
            LandingPage::Failed => "payment-failed",
        }
    }
}

/// Terminal result of processing one callback.
#[derive(Debug, Clone)]
pub enum CallbackOutcome {
    /// Redirect the buyer to a landing page.
    Redirect { page: LandingPage, location: String },

    /// Processing stopped at a gate. Nothing was mutated and the response is inert.
    Rejected(CallbackError),
}

impl CallbackOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, CallbackOutcome::Rejected(_))
    }

    pub fn redirect_location(&self) -> Option<&str> {
        match self {
            CallbackOutcome::Redirect { location, .. } => Some(location),
            CallbackOutcome::Rejected(_) => None,
        }
    }
}
