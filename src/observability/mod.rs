//! Observability subsystem for tabledb
//!
//! Structured JSON-lines logging of typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on the operation being observed
//! 3. No background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use tabledb::observability::{Logger, Event, Severity, log_event_with_fields};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::DatabaseRead, &[("path", "site.json")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
