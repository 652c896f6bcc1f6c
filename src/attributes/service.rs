//! Caller-side orchestration
//!
//! Resolves a product type to its definitions through a [`SchemaProvider`],
//! then hands them to the validator. This is the sequence the persistence
//! layer runs before accepting a product write.

use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::{SchemaProvider, SchemaResult, TypeId};

use super::outcome::{ValidationOutcome, ValidationReport};
use super::validator::{AttributeValidator, FailurePolicy};

/// Validates product attribute bags against provider-resolved schemas.
pub struct AttributeService<P> {
    provider: P,
    validator: AttributeValidator,
    policy: FailurePolicy,
    metrics: Arc<MetricsRegistry>,
}

impl<P: SchemaProvider> AttributeService<P> {
    /// Creates a service with the default validator and first-failure policy.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            validator: AttributeValidator::new(),
            policy: FailurePolicy::default(),
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    pub fn with_validator(mut self, validator: AttributeValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Validates a product's attributes, reporting the first failure.
    pub fn validate(
        &self,
        type_id: Option<TypeId>,
        attributes_json: Option<&str>,
    ) -> SchemaResult<ValidationOutcome> {
        self.run(FailurePolicy::FirstFailure, type_id, attributes_json)
            .map(ValidationReport::into_outcome)
    }

    /// Validates an update. The requested type applies; when the update
    /// carries none, the product keeps being checked against its current type.
    pub fn validate_update(
        &self,
        requested: Option<TypeId>,
        existing: Option<TypeId>,
        attributes_json: Option<&str>,
    ) -> SchemaResult<ValidationOutcome> {
        self.validate(requested.or(existing), attributes_json)
    }

    /// Validates under the configured failure policy.
    pub fn report(
        &self,
        type_id: Option<TypeId>,
        attributes_json: Option<&str>,
    ) -> SchemaResult<ValidationReport> {
        self.run(self.policy, type_id, attributes_json)
    }

    fn run(
        &self,
        policy: FailurePolicy,
        type_id: Option<TypeId>,
        attributes_json: Option<&str>,
    ) -> SchemaResult<ValidationReport> {
        self.metrics.increment_validations_run();

        let type_id = match type_id {
            Some(type_id) => type_id,
            None => {
                self.metrics.increment_validations_bypassed();
                log_event_with_fields(Event::AttributesBypassed, &[]);
                return Ok(ValidationReport::default());
            }
        };

        let definitions = self.provider.active_definitions(type_id)?;
        let report = self.validator.validate_with_policy(
            policy,
            Some(type_id),
            &definitions,
            attributes_json,
        );

        let type_label = type_id.to_string();
        match report.first() {
            None => {
                self.metrics.increment_validations_passed();
                log_event_with_fields(
                    Event::AttributesValidated,
                    &[("type_id", type_label.as_str())],
                );
            }
            Some(first) => {
                self.metrics.increment_validations_rejected();
                let count = report.violations.len().to_string();
                log_event_with_fields(
                    Event::AttributesRejected,
                    &[
                        ("reason", first.message.as_str()),
                        ("type_id", type_label.as_str()),
                        ("violations", count.as_str()),
                    ],
                );
            }
        }

        Ok(report)
    }
}
