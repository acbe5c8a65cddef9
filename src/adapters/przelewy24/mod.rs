//! Przelewy24 payment gateway adapter.
//!
//! - [`Przelewy24Gateway`] implements the `PaymentGateway` port
//! - [`PaymentRequestBuilder`] builds signed `transaction/register` payloads
//! - [`CallbackProcessor`] handles the status URL
//! - [`HttpGatewayClient`] talks to the REST API; [`MockGatewayClient`] stands in for it in tests

mod callback_processor;
mod gateway;
mod http_client;
mod mock_gateway_client;
mod request_builder;
mod site;

pub use callback_processor::{CallbackProcessor, VERIFIED_STATUS};
pub use gateway::{Collaborators, Przelewy24Gateway, PROVIDER_CODE};
pub use http_client::{HttpGatewayClient, HttpGatewayConfig, DEFAULT_TIMEOUT};
pub use mock_gateway_client::{GatewayCall, MockGatewayClient};
pub use request_builder::{
    to_minor_units, CartLine, PaymentRequestBuilder, RegisterTransaction, DEFAULT_COUNTRY,
    DEFAULT_LANGUAGE, MAX_LINE_TEXT,
};
pub use site::{PaymentLexicon, SiteLinks, ROUTE_PREFIX};

/// Production gateway root.
pub const PRODUCTION_BASE_URL: &str = "https://secure.przelewy24.pl/";

/// Sandbox gateway root.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.przelewy24.pl/";

/// Event log context for callback failures.
pub(crate) const EVENT_CONTEXT: &str = "Przelewy24 Payment";

/// Event log context for the raw callback body in debug mode.
pub(crate) const CALLBACK_START_CONTEXT: &str = "Przelewy24 Payment Callback Start";

/// Event log context prefix for request traces in debug mode.
pub(crate) const DEBUG_CONTEXT: &str = "Przelewy24 Payment Debug";

/// Gateway root for the selected environment.
pub fn environment_base_url(sandbox: bool) -> &'static str {
    if sandbox {
        SANDBOX_BASE_URL
    } else {
        PRODUCTION_BASE_URL
    }
}
