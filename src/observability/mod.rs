//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Counter metrics
//! - Typed events
//!
//! Observability is read-only: nothing here changes a validation outcome,
//! and a failed log write is ignored.
//!
//! # Usage
//!
//! ```ignore
//! use pim_attributes::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::AttributesRejected, &[("type_id", "3")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_validations_run();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Default severity for an event
fn severity_for(event: Event) -> Severity {
    if event.is_schema_defect() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
