//! Enumeration options parsing
//!
//! Enum field options are stored at rest as a JSON array of strings. The
//! parsed form is deduplicated and blank-filtered. A malformed source is a
//! schema-side defect that never reaches the caller: it parses to the empty
//! set, which the validator reads as "any string accepted".

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};

/// Deduplicated set of allowed enumeration values.
///
/// Membership ignores order. Iteration and display follow first-seen order
/// so rejection messages are stable across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OptionSet {
    values: Vec<String>,
}

impl OptionSet {
    /// Creates an empty (unrestricted) option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value unless it is blank or already present.
    ///
    /// Returns true if the value was inserted.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() || self.contains(&value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Ordinal, case-sensitive membership test.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Renders the options as `a, b, c`.
    pub fn joined(&self) -> String {
        self.values.join(", ")
    }
}

impl<S: Into<String>> FromIterator<S> for OptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = OptionSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl From<Vec<String>> for OptionSet {
    fn from(values: Vec<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<OptionSet> for Vec<String> {
    fn from(set: OptionSet) -> Self {
        set.values
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

/// Parses an options source (JSON array of strings) into an [`OptionSet`].
///
/// Absent, blank, unparsable or non-array sources yield the empty set, as
/// does an array holding anything other than strings and nulls. Null
/// elements count as blank and are dropped.
pub fn parse_options(source: Option<&str>) -> OptionSet {
    let source = match source {
        Some(s) if !s.trim().is_empty() => s,
        _ => return OptionSet::new(),
    };

    let items = match serde_json::from_str::<Value>(source) {
        Ok(Value::Array(items)) => items,
        Ok(_) | Err(_) => return malformed(source),
    };

    let mut set = OptionSet::new();
    for item in &items {
        match item {
            Value::String(value) => {
                set.insert(value.as_str());
            }
            // null reads as blank
            Value::Null => {}
            _ => return malformed(source),
        }
    }
    set
}

fn malformed(source: &str) -> OptionSet {
    log_event_with_fields(Event::OptionsSourceMalformed, &[("source", source)]);
    OptionSet::new()
}
