//! EventLog adapter that keeps entries in memory for assertions.

use std::sync::Mutex;

use crate::ports::{EventLog, Severity};

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEvent {
    pub severity: Severity,
    pub message: String,
    pub context: String,
}

/// In-memory event log for tests.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned. Not for production use.
#[derive(Debug, Default)]
pub struct RecordingEventLog {
    events: Mutex<Vec<LoggedEvent>>,
}

impl RecordingEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LoggedEvent> {
        self.events
            .lock()
            .expect("RecordingEventLog: lock poisoned")
            .clone()
    }

    pub fn events_with(&self, severity: Severity) -> Vec<LoggedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == severity)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

impl EventLog for RecordingEventLog {
    fn log_event(&self, severity: Severity, message: &str, context: &str) {
        self.events
            .lock()
            .expect("RecordingEventLog: lock poisoned")
            .push(LoggedEvent {
                severity,
                message: message.to_string(),
                context: context.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_in_order() {
        let log = RecordingEventLog::new();
        log.log_event(Severity::Info, "first", "ctx");
        log.log_event(Severity::Error, "second", "ctx");

        let events = log.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "first");
        assert_eq!(log.events_with(Severity::Error)[0].message, "second");
    }
}
