//! Request and outcome counters.
//!
//! Cheap atomic counters shared by every handler. A snapshot is reported by
//! the health endpoint.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Which way a request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ValidationFailed,
    NotFound,
    OperationFailed,
}

/// A contact mutation that succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
}

/// Metrics collector for the API.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    requests_total: Arc<AtomicU64>,
    validation_failures_total: Arc<AtomicU64>,
    not_found_total: Arc<AtomicU64>,
    operation_failures_total: Arc<AtomicU64>,
    contacts_created_total: Arc<AtomicU64>,
    contacts_updated_total: Arc<AtomicU64>,
    contacts_deleted_total: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a finished request by its outcome.
    pub fn record_request(&self, outcome: Outcome) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Success => return,
            Outcome::ValidationFailed => &self.validation_failures_total,
            Outcome::NotFound => &self.not_found_total,
            Outcome::OperationFailed => &self.operation_failures_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mutation(&self, mutation: Mutation) {
        let counter = match mutation {
            Mutation::Created => &self.contacts_created_total,
            Mutation::Updated => &self.contacts_updated_total,
            Mutation::Deleted => &self.contacts_deleted_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Requests that ended in any error.
    pub fn errors_total(&self) -> u64 {
        self.validation_failures_total.load(Ordering::Relaxed)
            + self.not_found_total.load(Ordering::Relaxed)
            + self.operation_failures_total.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        for counter in [
            &self.requests_total,
            &self.validation_failures_total,
            &self.not_found_total,
            &self.operation_failures_total,
            &self.contacts_created_total,
            &self.contacts_updated_total,
            &self.contacts_deleted_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            validation_failures_total: self.validation_failures_total.load(Ordering::Relaxed),
            not_found_total: self.not_found_total.load(Ordering::Relaxed),
            operation_failures_total: self.operation_failures_total.load(Ordering::Relaxed),
            contacts_created_total: self.contacts_created_total.load(Ordering::Relaxed),
            contacts_updated_total: self.contacts_updated_total.load(Ordering::Relaxed),
            contacts_deleted_total: self.contacts_deleted_total.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub requests_total: u64,
    pub validation_failures_total: u64,
    pub not_found_total: u64,
    pub operation_failures_total: u64,
    pub contacts_created_total: u64,
    pub contacts_updated_total: u64,
    pub contacts_deleted_total: u64,
}
