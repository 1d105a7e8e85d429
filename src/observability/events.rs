//! Observable events for tabledb
//!
//! Events are explicit and typed. Each one is logged at the boundary of
//! an operation, never per row.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// CLI configuration loaded
    ConfigLoaded,

    // Reading
    /// Database file read from disk
    DatabaseRead,
    /// Database text parsed into a literal
    DatabaseParsed,

    // Validation
    /// `_tabledef` resolved into table definitions
    SchemaResolved,
    /// Whole database validated
    ValidationPassed,
    /// Validation stopped at the first error
    ValidationFailed,

    // Transformation
    /// Table stably sorted into a new database
    TableSorted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatabaseRead => "DATABASE_READ",
            Event::DatabaseParsed => "DATABASE_PARSED",
            Event::SchemaResolved => "SCHEMA_RESOLVED",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::TableSorted => "TABLE_SORTED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ValidationFailed => Severity::Warn,
            Event::DatabaseParsed | Event::SchemaResolved => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
