//! Attribute validator
//!
//! Validation semantics:
//! - No type context: always valid, the payload is not even parsed
//! - Blank or absent attribute text is `{}`
//! - The payload must be a JSON object; anything else stops validation
//! - Definitions are evaluated in the order given (callers pass them sorted
//!   by `sort_order`)
//! - Absent optional keys are skipped without a kind check
//! - Unknown keys in the bag are ignored
//!
//! Reporting is governed by [`FailurePolicy`]. The default reports only the
//! first failing field, which is what API clients expect.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{FieldDefinition, FieldKind, TypeId};

use super::coerce::{as_boolean, as_date, as_number, as_text};
use super::outcome::{ValidationOutcome, ValidationReport, Violation};

/// Default compiled-size limit for text patterns (1 MiB).
pub const DEFAULT_PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// How many failures a validation call reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop at the first failing field
    #[default]
    #[serde(rename = "first")]
    FirstFailure,
    /// Evaluate every field and collect each failure
    #[serde(rename = "all")]
    AllFailures,
}

/// Validates attribute bags against field definitions.
///
/// Holds no per-call state; one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct AttributeValidator {
    pattern_size_limit: usize,
}

impl Default for AttributeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeValidator {
    pub fn new() -> Self {
        Self {
            pattern_size_limit: DEFAULT_PATTERN_SIZE_LIMIT,
        }
    }

    /// Caps the compiled size of text patterns.
    pub fn with_pattern_size_limit(mut self, bytes: usize) -> Self {
        self.pattern_size_limit = bytes;
        self
    }

    pub fn pattern_size_limit(&self) -> usize {
        self.pattern_size_limit
    }

    /// Validates `attributes_json` against `definitions`, reporting the
    /// first failure.
    pub fn validate(
        &self,
        type_context: Option<TypeId>,
        definitions: &[FieldDefinition],
        attributes_json: Option<&str>,
    ) -> ValidationOutcome {
        self.validate_with_policy(
            FailurePolicy::FirstFailure,
            type_context,
            definitions,
            attributes_json,
        )
        .into_outcome()
    }

    /// Validates and collects every field failure.
    ///
    /// A malformed payload is still reported alone.
    pub fn validate_all(
        &self,
        type_context: Option<TypeId>,
        definitions: &[FieldDefinition],
        attributes_json: Option<&str>,
    ) -> ValidationReport {
        self.validate_with_policy(
            FailurePolicy::AllFailures,
            type_context,
            definitions,
            attributes_json,
        )
    }

    pub fn validate_with_policy(
        &self,
        policy: FailurePolicy,
        type_context: Option<TypeId>,
        definitions: &[FieldDefinition],
        attributes_json: Option<&str>,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();

        if type_context.is_none() {
            return report;
        }

        let attributes = match parse_attributes(attributes_json) {
            Ok(attributes) => attributes,
            Err(violation) => {
                report.violations.push(violation);
                return report;
            }
        };

        for definition in definitions {
            if let Err(violation) = self.check_field(definition, &attributes) {
                report.violations.push(violation);
                if policy == FailurePolicy::FirstFailure {
                    break;
                }
            }
        }

        report
    }

    /// Checks one definition against the parsed bag.
    fn check_field(
        &self,
        definition: &FieldDefinition,
        attributes: &Map<String, Value>,
    ) -> Result<(), Violation> {
        let key = definition.key.as_str();

        let value = match attributes.get(key) {
            Some(value) => value,
            None if definition.required => return Err(Violation::missing_required(key)),
            None => return Ok(()),
        };

        match &definition.kind {
            FieldKind::Enum { options } => {
                let text = as_text(value).ok_or_else(|| Violation::not_a_string(key))?;
                if !options.is_empty() && !options.contains(text) {
                    return Err(Violation::not_in_options(key, &options.joined()));
                }
            }
            FieldKind::Number { min, max } => {
                let number = as_number(value).ok_or_else(|| Violation::not_a_number(key))?;
                if let Some(min) = *min {
                    if number < min {
                        return Err(Violation::below_min(key, min));
                    }
                }
                if let Some(max) = *max {
                    if number > max {
                        return Err(Violation::above_max(key, max));
                    }
                }
            }
            FieldKind::Text { pattern } => {
                let text = as_text(value).ok_or_else(|| Violation::not_a_string(key))?;
                if let Some(pattern) = pattern.as_deref().filter(|p| !p.trim().is_empty()) {
                    if !self.pattern_matches(key, pattern, text) {
                        return Err(Violation::pattern_mismatch(key));
                    }
                }
            }
            FieldKind::Boolean => {
                as_boolean(value).ok_or_else(|| Violation::not_a_boolean(key))?;
            }
            FieldKind::Date => {
                as_date(value).ok_or_else(|| Violation::not_a_date(key))?;
            }
        }

        Ok(())
    }

    /// Unanchored search. A pattern that does not compile matches nothing.
    fn pattern_matches(&self, key: &str, pattern: &str, text: &str) -> bool {
        match RegexBuilder::new(pattern)
            .size_limit(self.pattern_size_limit)
            .build()
        {
            Ok(re) => re.is_match(text),
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::PatternInvalid,
                    &[("error", reason.as_str()), ("field", key), ("pattern", pattern)],
                );
                false
            }
        }
    }
}

/// Parses attribute text into a JSON object.
fn parse_attributes(attributes_json: Option<&str>) -> Result<Map<String, Value>, Violation> {
    let text = match attributes_json {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Ok(Map::new()),
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => Err(Violation::malformed_payload()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ViolationKind;

    const TYPE: Option<TypeId> = Some(TypeId(1));

    fn check(defs: &[FieldDefinition], json: &str) -> ValidationOutcome {
        AttributeValidator::new().validate(TYPE, defs, Some(json))
    }

    fn reason(defs: &[FieldDefinition], json: &str) -> String {
        check(defs, json).reason().unwrap_or("valid").to_string()
    }

    #[test]
    fn test_no_type_context_bypasses_everything() {
        let defs = [FieldDefinition::text("name", None).required()];
        let validator = AttributeValidator::new();
        assert!(validator.validate(None, &defs, Some("not json")).is_valid());
        assert!(validator.validate(None, &defs, None).is_valid());
        assert!(validator.validate_all(None, &defs, Some("[1]")).is_valid());
    }

    #[test]
    fn test_blank_payload_is_empty_object() {
        let defs = [FieldDefinition::text("name", None)];
        let validator = AttributeValidator::new();
        for blank in [None, Some(""), Some("   "), Some("\n\t")] {
            assert!(validator.validate(TYPE, &defs, blank).is_valid());
        }

        let required = [FieldDefinition::text("name", None).required()];
        assert_eq!(
            validator.validate(TYPE, &required, Some("  ")).reason(),
            Some("Missing required attribute: name")
        );
    }

    #[test]
    fn test_malformed_payload() {
        for bad in ["{", "not json", "[1,2]", "42", "\"text\"", "null", "true"] {
            let outcome = check(&[], bad);
            let violation = outcome.violation().unwrap();
            assert_eq!(violation.kind, ViolationKind::MalformedPayload);
            assert_eq!(violation.message, "Attributes must be a valid JSON object");
        }
    }

    #[test]
    fn test_malformed_payload_stops_before_fields() {
        let defs = [FieldDefinition::text("a", None).required()];
        let report = AttributeValidator::new().validate_all(TYPE, &defs, Some("[]"));
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::MalformedPayload);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let defs = [FieldDefinition::number("n", None, None)];
        assert!(check(&defs, r#"{"n": 1, "extra": [1, {"x": null}]}"#).is_valid());
    }

    #[test]
    fn test_absent_optional_skips_kind_check() {
        let defs = [
            FieldDefinition::number("n", Some(0.0), None),
            FieldDefinition::date("d"),
        ];
        assert!(check(&defs, "{}").is_valid());
    }

    #[test]
    fn test_enum_rules() {
        let defs = [FieldDefinition::enumeration("color", ["red", "green", "blue"])];
        assert!(check(&defs, r#"{"color": "green"}"#).is_valid());
        assert_eq!(
            reason(&defs, r#"{"color": "purple"}"#),
            "color must be one of: red, green, blue"
        );
        assert_eq!(reason(&defs, r#"{"color": 3}"#), "color must be a string");
        assert_eq!(reason(&defs, r#"{"color": null}"#), "color must be a string");
    }

    #[test]
    fn test_enum_without_options_accepts_any_string() {
        let defs = [FieldDefinition::enumeration("tag", Vec::<String>::new())];
        assert!(check(&defs, r#"{"tag": "anything"}"#).is_valid());
        assert_eq!(reason(&defs, r#"{"tag": false}"#), "tag must be a string");
    }

    #[test]
    fn test_number_rules() {
        let defs = [FieldDefinition::number("qty", Some(0.0), Some(100.0))];
        assert!(check(&defs, r#"{"qty": 50}"#).is_valid());
        assert!(check(&defs, r#"{"qty": "50"}"#).is_valid());
        assert!(check(&defs, r#"{"qty": 0}"#).is_valid());
        assert!(check(&defs, r#"{"qty": 100.0}"#).is_valid());
        assert_eq!(reason(&defs, r#"{"qty": 150}"#), "qty must be <= 100");
        assert_eq!(reason(&defs, r#"{"qty": -1}"#), "qty must be >= 0");
        assert_eq!(reason(&defs, r#"{"qty": "abc"}"#), "qty must be a number");
        assert_eq!(reason(&defs, r#"{"qty": true}"#), "qty must be a number");
        assert_eq!(reason(&defs, r#"{"qty": "NaN"}"#), "qty must be a number");
    }

    #[test]
    fn test_number_grouped_thousands() {
        let defs = [FieldDefinition::number("price", None, Some(5000.0))];
        assert!(check(&defs, r#"{"price": "1,000"}"#).is_valid());
        assert!(check(&defs, r#"{"price": "1,000.5"}"#).is_valid());
        assert_eq!(reason(&defs, r#"{"price": "10,000"}"#), "price must be <= 5000");
        assert_eq!(reason(&defs, r#"{"price": "1.000,5"}"#), "price must be a number");
    }

    #[test]
    fn test_number_beyond_f64_range_is_field_failure() {
        let defs = [FieldDefinition::number("n", None, None)];
        assert_eq!(reason(&defs, r#"{"n": 1e400}"#), "n must be a number");
        assert_eq!(reason(&defs, r#"{"n": -1e400}"#), "n must be a number");

        let text = [FieldDefinition::text("t", None)];
        assert_eq!(reason(&text, r#"{"t": 1e400}"#), "t must be a string");

        // Not referenced by any definition: ignored like other unknown keys
        assert!(check(&[], r#"{"huge": 1e400}"#).is_valid());
    }

    #[test]
    fn test_number_min_checked_before_max() {
        // Inverted bounds: every value fails one of them, min wins.
        let defs = [FieldDefinition::number("n", Some(10.0), Some(5.0))];
        assert_eq!(reason(&defs, r#"{"n": 7}"#), "n must be >= 10");
        assert_eq!(reason(&defs, r#"{"n": 12}"#), "n must be <= 5");
    }

    #[test]
    fn test_number_single_bound() {
        let only_max = [FieldDefinition::number("n", None, Some(1.5))];
        assert!(check(&only_max, r#"{"n": -1000}"#).is_valid());
        assert_eq!(reason(&only_max, r#"{"n": 2}"#), "n must be <= 1.5");

        let unbounded = [FieldDefinition::number("n", None, None)];
        assert!(check(&unbounded, r#"{"n": 1e300}"#).is_valid());
    }

    #[test]
    fn test_text_pattern_rules() {
        let defs = [FieldDefinition::text("code", Some("^[A-Z]{3}$"))];
        assert!(check(&defs, r#"{"code": "ABC"}"#).is_valid());
        assert_eq!(reason(&defs, r#"{"code": "abc"}"#), "code format is invalid");
        assert_eq!(reason(&defs, r#"{"code": "AB"}"#), "code format is invalid");
        assert_eq!(reason(&defs, r#"{"code": 123}"#), "code must be a string");
    }

    #[test]
    fn test_text_pattern_is_unanchored_search() {
        let defs = [FieldDefinition::text("sku", Some("[0-9]+"))];
        assert!(check(&defs, r#"{"sku": "abc-42-x"}"#).is_valid());
        assert_eq!(reason(&defs, r#"{"sku": "none"}"#), "sku format is invalid");
    }

    #[test]
    fn test_blank_pattern_means_no_check() {
        let defs = [FieldDefinition::text("note", Some("  "))];
        assert!(check(&defs, r#"{"note": "whatever"}"#).is_valid());
    }

    #[test]
    fn test_invalid_pattern_fails_closed() {
        let defs = [FieldDefinition::text("t", Some("(unclosed"))];
        assert_eq!(reason(&defs, r#"{"t": "(unclosed"}"#), "t format is invalid");
    }

    #[test]
    fn test_unsupported_pattern_syntax_fails_closed() {
        // Lookaround and backreferences are outside the supported dialect
        let lookahead = [FieldDefinition::text("t", Some("^(?=.*[0-9]).+$"))];
        assert_eq!(reason(&lookahead, r#"{"t": "abc1"}"#), "t format is invalid");

        let backref = [FieldDefinition::text("t", Some(r"(a)\1"))];
        assert_eq!(reason(&backref, r#"{"t": "aa"}"#), "t format is invalid");
    }

    #[test]
    fn test_pattern_size_limit() {
        let defs = [FieldDefinition::text("t", Some("a{1000}"))];
        let payload = format!(r#"{{"t": "{}"}}"#, "a".repeat(1000));

        let tight = AttributeValidator::new().with_pattern_size_limit(64);
        let outcome = tight.validate(TYPE, &defs, Some(payload.as_str()));
        assert_eq!(outcome.reason(), Some("t format is invalid"));

        let outcome = AttributeValidator::new().validate(TYPE, &defs, Some(payload.as_str()));
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_boolean_rules() {
        let defs = [FieldDefinition::boolean("active")];
        assert!(check(&defs, r#"{"active": true}"#).is_valid());
        assert!(check(&defs, r#"{"active": "false"}"#).is_valid());
        assert_eq!(reason(&defs, r#"{"active": 1}"#), "active must be a boolean");
        assert_eq!(reason(&defs, r#"{"active": "yes"}"#), "active must be a boolean");
    }

    #[test]
    fn test_date_rules() {
        let defs = [FieldDefinition::date("released")];
        assert!(check(&defs, r#"{"released": "2024-05-01"}"#).is_valid());
        assert!(check(&defs, r#"{"released": "2024-05-01T12:00:00Z"}"#).is_valid());
        assert_eq!(
            reason(&defs, r#"{"released": "soon"}"#),
            "released must be a date (ISO)"
        );
        assert_eq!(
            reason(&defs, r#"{"released": 20240501}"#),
            "released must be a date (ISO)"
        );
    }

    #[test]
    fn test_required_present_null_is_kind_failure() {
        let defs = [FieldDefinition::number("n", None, None).required()];
        assert_eq!(reason(&defs, r#"{"n": null}"#), "n must be a number");
    }

    #[test]
    fn test_first_failure_wins() {
        let defs = [
            FieldDefinition::number("a", None, None).at(1),
            FieldDefinition::boolean("b").required().at(2),
        ];
        assert_eq!(reason(&defs, r#"{"a": "x"}"#), "a must be a number");
    }

    #[test]
    fn test_all_failures_collected_in_order() {
        let defs = [
            FieldDefinition::number("a", None, None).at(1),
            FieldDefinition::boolean("b").required().at(2),
            FieldDefinition::text("c", None).at(3),
            FieldDefinition::date("d").at(4),
        ];
        let payload = r#"{"a": "x", "c": "ok", "d": 5}"#;
        let report = AttributeValidator::new().validate_all(TYPE, &defs, Some(payload));
        let messages: Vec<_> = report.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "a must be a number",
                "Missing required attribute: b",
                "d must be a date (ISO)"
            ]
        );
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(
            serde_json::from_str::<FailurePolicy>("\"all\"").unwrap(),
            FailurePolicy::AllFailures
        );
        assert_eq!(
            serde_json::to_string(&FailurePolicy::FirstFailure).unwrap(),
            "\"first\""
        );
        assert_eq!(FailurePolicy::default(), FailurePolicy::FirstFailure);
    }
}
