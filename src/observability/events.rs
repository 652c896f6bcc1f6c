//! Observable events
//!
//! Events are explicit and typed. Each maps to one upper-case event name in
//! the log stream.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Schema directory loaded
    SchemasLoaded,
    /// Non-JSON file found in the schema directory
    SchemaFileSkipped,

    // Validation
    /// Attribute bag accepted
    AttributesValidated,
    /// Attribute bag rejected
    AttributesRejected,
    /// No type context, validation bypassed
    AttributesBypassed,

    // Schema defects that never reach the caller
    /// Enum options source could not be parsed
    OptionsSourceMalformed,
    /// Text pattern could not be compiled
    PatternInvalid,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaFileSkipped => "SCHEMA_FILE_SKIPPED",

            Event::AttributesValidated => "ATTRIBUTES_VALIDATED",
            Event::AttributesRejected => "ATTRIBUTES_REJECTED",
            Event::AttributesBypassed => "ATTRIBUTES_BYPASSED",

            Event::OptionsSourceMalformed => "OPTIONS_SOURCE_MALFORMED",
            Event::PatternInvalid => "PATTERN_INVALID",
        }
    }

    /// Returns true if this event reports a schema-side defect
    pub fn is_schema_defect(&self) -> bool {
        matches!(self, Event::OptionsSourceMalformed | Event::PatternInvalid)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
