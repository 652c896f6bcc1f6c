//! Attribute validation engine
//!
//! Validates a product's free-form JSON attribute bag against the field
//! definitions of its product type.
//!
//! # Design Principles
//!
//! - Pure: no I/O, no shared mutable state, safe to call concurrently
//! - Deterministic: identical inputs give identical outcomes
//! - Never panics on caller input; every failure is a `ValidationOutcome`
//! - Lenient coercion for number, boolean and date values sent as strings
//! - First failure in `sort_order` is reported by default
//!
//! # Usage
//!
//! ```
//! use pim_attributes::attributes::AttributeValidator;
//! use pim_attributes::schema::{FieldDefinition, TypeId};
//!
//! let defs = vec![
//!     FieldDefinition::enumeration("color", ["red", "green"]).required().at(1),
//!     FieldDefinition::number("weight", Some(0.0), None).at(2),
//! ];
//!
//! let validator = AttributeValidator::new();
//! let payload = r#"{"color":"red","weight":"2.5"}"#;
//! let outcome = validator.validate(Some(TypeId(1)), &defs, Some(payload));
//! assert!(outcome.is_valid());
//!
//! let outcome = validator.validate(Some(TypeId(1)), &defs, Some(r#"{"weight": 1}"#));
//! assert_eq!(outcome.reason(), Some("Missing required attribute: color"));
//! ```

pub mod coerce;
mod outcome;
mod service;
mod validator;

pub use outcome::{ValidationOutcome, ValidationReport, Violation, ViolationKind};
pub use service::AttributeService;
pub use validator::{AttributeValidator, FailurePolicy, DEFAULT_PATTERN_SIZE_LIMIT};
