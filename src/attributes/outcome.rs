//! Validation outcomes
//!
//! The message strings built here are surfaced verbatim to API clients, so
//! their wording is part of the contract.

use std::fmt;

use serde::Serialize;

/// Category of a caller-visible validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Attribute text is not JSON or not a JSON object
    MalformedPayload,
    /// A required key is absent
    MissingRequired,
    /// The value cannot be classified as the field's kind
    WrongKind,
    /// The value has the right kind but breaks a bound, pattern or option set
    ConstraintViolation,
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Offending key; `None` for payload-level failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl Violation {
    fn for_field(kind: ViolationKind, key: &str, message: String) -> Self {
        Self {
            kind,
            field: Some(key.to_string()),
            message,
        }
    }

    pub fn malformed_payload() -> Self {
        Self {
            kind: ViolationKind::MalformedPayload,
            field: None,
            message: "Attributes must be a valid JSON object".to_string(),
        }
    }

    pub fn missing_required(key: &str) -> Self {
        Self::for_field(
            ViolationKind::MissingRequired,
            key,
            format!("Missing required attribute: {}", key),
        )
    }

    pub fn not_a_string(key: &str) -> Self {
        Self::for_field(ViolationKind::WrongKind, key, format!("{} must be a string", key))
    }

    pub fn not_a_number(key: &str) -> Self {
        Self::for_field(ViolationKind::WrongKind, key, format!("{} must be a number", key))
    }

    pub fn not_a_boolean(key: &str) -> Self {
        Self::for_field(ViolationKind::WrongKind, key, format!("{} must be a boolean", key))
    }

    pub fn not_a_date(key: &str) -> Self {
        Self::for_field(ViolationKind::WrongKind, key, format!("{} must be a date (ISO)", key))
    }

    pub fn not_in_options(key: &str, allowed: &str) -> Self {
        Self::for_field(
            ViolationKind::ConstraintViolation,
            key,
            format!("{} must be one of: {}", key, allowed),
        )
    }

    pub fn below_min(key: &str, min: f64) -> Self {
        Self::for_field(
            ViolationKind::ConstraintViolation,
            key,
            format!("{} must be >= {}", key, min),
        )
    }

    pub fn above_max(key: &str, max: f64) -> Self {
        Self::for_field(
            ViolationKind::ConstraintViolation,
            key,
            format!("{} must be <= {}", key, max),
        )
    }

    pub fn pattern_mismatch(key: &str) -> Self {
        Self::for_field(
            ViolationKind::ConstraintViolation,
            key,
            format!("{} format is invalid", key),
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result of validating one attribute bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Violation),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// The failure message, if any
    pub fn reason(&self) -> Option<&str> {
        self.violation().map(|v| v.message.as_str())
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(v) => Some(v),
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => write!(f, "valid"),
            ValidationOutcome::Invalid(v) => write!(f, "{}", v),
        }
    }
}

/// Every failure of one attribute bag, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The failure first-failure mode would have reported
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Collapses the report to its first failure
    pub fn into_outcome(self) -> ValidationOutcome {
        match self.violations.into_iter().next() {
            Some(v) => ValidationOutcome::Invalid(v),
            None => ValidationOutcome::Valid,
        }
    }
}
