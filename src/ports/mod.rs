//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the payment domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `OrderProcessor` - Orders, carts and payment sessions
//! - `SettingsStore` - Merchant configuration by key
//! - `EventLog` - Operator-facing log sink
//! - `TemplateRenderer` - Localized string rendering
//!
//! ## Gateway Ports
//!
//! - `GatewayClient` - Outbound REST calls to the gateway
//! - `PaymentGateway` - Provider capability (markup, link, callback)

mod event_log;
mod gateway_client;
mod order_processor;
mod payment_gateway;
mod settings_store;
mod template_renderer;

pub use event_log::{EventLog, Severity};
pub use gateway_client::{GatewayClient, GatewayEndpoint};
pub use order_processor::{OrderProcessor, PaymentApplied};
pub use payment_gateway::PaymentGateway;
pub use settings_store::{load_merchant_settings, SettingsStore};
pub use template_renderer::TemplateRenderer;
