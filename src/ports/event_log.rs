//! Event log port - operator-facing log sink.
//!
//! Separate from the ambient `tracing` output: entries written here are the
//! ones an operator of the shop sees in the back office (callback failures,
//! debug traces of gateway traffic).

/// Severity of a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Port for the logging collaborator.
pub trait EventLog: Send + Sync {
    /// Record an event. `context` names the source, e.g. "Przelewy24 Payment".
    fn log_event(&self, severity: Severity, message: &str, context: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_importance() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
