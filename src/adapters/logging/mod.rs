//! Event log adapters.

mod recording_event_log;
mod tracing_event_log;

pub use recording_event_log::{LoggedEvent, RecordingEventLog};
pub use tracing_event_log::TracingEventLog;
