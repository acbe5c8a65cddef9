//! EventLog adapter that forwards to `tracing`.

use crate::ports::{EventLog, Severity};

/// Writes operator events as `tracing` events on the `event_log` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLog;

impl TracingEventLog {
    pub fn new() -> Self {
        Self
    }
}

impl EventLog for TracingEventLog {
    fn log_event(&self, severity: Severity, message: &str, context: &str) {
        match severity {
            Severity::Info => tracing::info!(target: "event_log", context, "{}", message),
            Severity::Warning => tracing::warn!(target: "event_log", context, "{}", message),
            Severity::Error => tracing::error!(target: "event_log", context, "{}", message),
        }
    }
}
