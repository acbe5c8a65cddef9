//! Payment domain - orders, payment sessions and the gateway protocol rules.
//!
//! Contains:
//! - `Order`, `CartItem`, `PaymentSession` snapshots from the order subsystem
//! - `MerchantSettings` with the gateway credentials
//! - `SignatureCodec` for SHA-384 request/notification signatures
//! - `prorate` for partial-payment cart scaling
//! - Callback value objects and the error taxonomy

mod callback;
mod errors;
mod order;
mod proration;
mod session;
mod settings;
pub mod signature;

pub use callback::{
    CallbackOutcome, CallbackRequest, LandingPage, Notification, PAYMENT_HASH_PARAM,
    REQUIRED_NOTIFICATION_FIELDS,
};
pub use errors::{CallbackError, GatewayError, LookupError, PaymentError};
pub use order::{CartItem, Order, OrderFields};
pub use proration::{prorate, PricedLine};
pub use session::PaymentSession;
pub use settings::{keys as setting_keys, MerchantSettings};
pub use signature::SignatureCodec;
