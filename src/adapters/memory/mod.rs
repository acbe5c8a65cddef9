//! In-memory adapters for the order subsystem and settings.

mod in_memory_order_processor;
mod static_settings_store;

pub use in_memory_order_processor::InMemoryOrderProcessor;
pub use static_settings_store::StaticSettingsStore;
