//! Adapters - implementations of the ports.
//!
//! - `przelewy24` - the Przelewy24 gateway (REST client, request builder, callbacks)
//! - `http` - axum routes
//! - `memory` - in-memory order processor and settings store
//! - `logging` - event log sinks
//! - `template` - placeholder template rendering

pub mod http;
pub mod logging;
pub mod memory;
pub mod przelewy24;
pub mod template;

pub use logging::{RecordingEventLog, TracingEventLog};
pub use memory::{InMemoryOrderProcessor, StaticSettingsStore};
pub use przelewy24::{HttpGatewayClient, HttpGatewayConfig, MockGatewayClient, Przelewy24Gateway};
pub use template::PlaceholderRenderer;
