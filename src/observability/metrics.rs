//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters.
///
/// Relaxed ordering is enough: counters are independent and only read for
/// reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Validation calls, bypassed ones included
    validations_run: AtomicU64,
    validations_passed: AtomicU64,
    validations_rejected: AtomicU64,
    /// Calls without a type context
    validations_bypassed: AtomicU64,
    /// Product types loaded from disk
    schemas_loaded: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_validations_run(&self) {
        self.validations_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validations_passed(&self) {
        self.validations_passed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validations_rejected(&self) {
        self.validations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validations_bypassed(&self) {
        self.validations_bypassed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_schemas_loaded(&self, count: u64) {
        self.schemas_loaded.fetch_add(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            validations_run: self.validations_run.load(Ordering::Relaxed),
            validations_passed: self.validations_passed.load(Ordering::Relaxed),
            validations_rejected: self.validations_rejected.load(Ordering::Relaxed),
            validations_bypassed: self.validations_bypassed.load(Ordering::Relaxed),
            schemas_loaded: self.schemas_loaded.load(Ordering::Relaxed),
        }
    }

    /// Current snapshot as a JSON object string
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub validations_run: u64,
    pub validations_passed: u64,
    pub validations_rejected: u64,
    pub validations_bypassed: u64,
    pub schemas_loaded: u64,
}
