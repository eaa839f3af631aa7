// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Metrics-backed instrumentation facade
//!
//! Every event is bound to its own counter or histogram when the facade is
//! built. Recording an event is a field access and one atomic update, with no
//! lookup by name and no allocation.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::MetricsResult;
use crate::instrumentation::Instrumentation;
use crate::metric::{Counter, Histogram};
use crate::registry::MetricRegistry;
use crate::types::MetricsConfig;

/// [`Instrumentation`] that records into a [`MetricRegistry`].
///
/// Cheap to clone and safe to share across threads and tasks.
#[derive(Clone)]
pub struct MetricsInstrumentation {
    inner: Arc<MetricsInstrumentationInner>,
}

struct MetricsInstrumentationInner {
    prefix: String,

    // Insert
    insert_call_count: Counter,
    insert_record_count: Counter,
    insert_call_duration: Histogram,
    insert_record_duration: Histogram,
    insert_quorum_failure_count: Counter,

    // Select
    select_call_count: Counter,
    select_keys_count: Counter,
    select_send_to_count: Counter,
    select_first_response_duration: Histogram,
    select_partial_error_count: Counter,
    select_blocking_duration: Histogram,
    select_overhead_duration: Histogram,
    select_duration: Histogram,
    select_send_all_promotion_count: Counter,
    select_retrieved_count: Counter,
    select_returned_count: Counter,
    select_repair_needed_count: Counter,

    // Delete
    delete_call_count: Counter,
    delete_record_count: Counter,
    delete_call_duration: Histogram,
    delete_record_duration: Histogram,
    delete_quorum_failure_count: Counter,

    // Repair
    repair_call_count: Counter,
    repair_request_count: Counter,
    repair_discarded_count: Counter,
    repair_write_success_count: Counter,
    repair_write_failure_count: Counter,

    // Walker
    walk_keys_count: Counter,
}

impl MetricsInstrumentation {
    /// Register every facade metric in `registry`, each name starting with `prefix`.
    ///
    /// Fails with [`MetricsError::DuplicateMetric`](crate::MetricsError::DuplicateMetric)
    /// if any name is taken, e.g. by a second facade with the same prefix.
    /// Metrics registered before the failure stay registered; the caller is
    /// expected to abort startup.
    pub fn new(registry: &MetricRegistry, prefix: &str) -> MetricsResult<Self> {
        let counter = |suffix: &str, help: &str| registry.counter(&format!("{prefix}{suffix}"), help);
        let histogram =
            |suffix: &str, help: &str| registry.histogram(&format!("{prefix}{suffix}"), help);

        let inner = MetricsInstrumentationInner {
            prefix: prefix.to_string(),

            insert_call_count: counter("insert_call_count", "How many insert calls have been made.")?,
            insert_record_count: counter("insert_record_count", "How many records have been inserted.")?,
            insert_call_duration: histogram(
                "insert_call_duration_nanoseconds",
                "Insert duration per-call.",
            )?,
            insert_record_duration: histogram(
                "insert_record_duration_nanoseconds",
                "Insert duration per-record.",
            )?,
            insert_quorum_failure_count: counter(
                "insert_quorum_failure_count",
                "Insert quorum failure count.",
            )?,

            select_call_count: counter("select_call_count", "How many select calls have been made.")?,
            select_keys_count: counter("select_keys_count", "How many keys have been selected.")?,
            select_send_to_count: counter(
                "select_send_to_count",
                "How many clusters have received select calls.",
            )?,
            select_first_response_duration: histogram(
                "select_first_response_duration_nanoseconds",
                "Select first response duration.",
            )?,
            select_partial_error_count: counter(
                "select_partial_error_count",
                "How many partial errors have occurred in selects.",
            )?,
            select_blocking_duration: histogram(
                "select_blocking_duration_nanoseconds",
                "Select blocking duration.",
            )?,
            select_overhead_duration: histogram(
                "select_overhead_duration_nanoseconds",
                "Select overhead duration.",
            )?,
            select_duration: histogram("select_duration_nanoseconds", "Overall select duration.")?,
            select_send_all_promotion_count: counter(
                "select_send_all_promotion_count",
                "How many select requests were promoted to a send-all, in appropriate read strategies.",
            )?,
            select_retrieved_count: counter(
                "select_retrieved_count",
                "How many key-score-member tuples have been retrieved from clusters by select calls.",
            )?,
            select_returned_count: counter(
                "select_returned_count",
                "How many key-score-member tuples have been returned to clients by select calls.",
            )?,
            select_repair_needed_count: counter(
                "select_repair_needed_count",
                "How many repairs have been detected and requested by select calls.",
            )?,

            delete_call_count: counter("delete_call_count", "How many delete calls have been made.")?,
            delete_record_count: counter(
                "delete_record_count",
                "How many records have been deleted in delete calls.",
            )?,
            delete_call_duration: histogram(
                "delete_call_duration_nanoseconds",
                "Delete duration, per-call.",
            )?,
            delete_record_duration: histogram(
                "delete_record_duration_nanoseconds",
                "Delete duration, per-record.",
            )?,
            delete_quorum_failure_count: counter(
                "delete_quorum_failure_count",
                "Delete quorum failure count.",
            )?,

            repair_call_count: counter("repair_call_count", "How many repair calls have been made.")?,
            repair_request_count: counter(
                "repair_request_count",
                "How many key-member tuples have been repaired.",
            )?,
            repair_discarded_count: counter(
                "repair_discarded_count",
                "How many repair calls have been discarded due to rate or buffer limits.",
            )?,
            repair_write_success_count: counter(
                "repair_write_success_count",
                "Repair write success count.",
            )?,
            repair_write_failure_count: counter(
                "repair_write_failure_count",
                "Repair write failure count.",
            )?,

            walk_keys_count: counter(
                "walk_keys_count",
                "How many keys have been walked by the walker process.",
            )?,
        };

        info!(prefix, "Instrumentation metrics registered");
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Register every facade metric under `config.prefix`
    pub fn from_config(registry: &MetricRegistry, config: &MetricsConfig) -> MetricsResult<Self> {
        Self::new(registry, &config.prefix)
    }

    /// Prefix every metric name was registered with
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }
}

impl Instrumentation for MetricsInstrumentation {
    fn insert_call(&self) {
        self.inner.insert_call_count.inc();
    }

    fn insert_record_count(&self, n: usize) {
        self.inner.insert_record_count.inc_by(n as u64);
    }

    fn insert_call_duration(&self, d: Duration) {
        self.inner.insert_call_duration.observe_duration(d);
    }

    fn insert_record_duration(&self, d: Duration) {
        self.inner.insert_record_duration.observe_duration(d);
    }

    fn insert_quorum_failure(&self) {
        self.inner.insert_quorum_failure_count.inc();
    }

    fn select_call(&self) {
        self.inner.select_call_count.inc();
    }

    fn select_keys(&self, n: usize) {
        self.inner.select_keys_count.inc_by(n as u64);
    }

    fn select_send_to(&self, n: usize) {
        self.inner.select_send_to_count.inc_by(n as u64);
    }

    fn select_first_response_duration(&self, d: Duration) {
        self.inner.select_first_response_duration.observe_duration(d);
    }

    fn select_partial_error(&self) {
        self.inner.select_partial_error_count.inc();
    }

    fn select_blocking_duration(&self, d: Duration) {
        self.inner.select_blocking_duration.observe_duration(d);
    }

    fn select_overhead_duration(&self, d: Duration) {
        self.inner.select_overhead_duration.observe_duration(d);
    }

    fn select_duration(&self, d: Duration) {
        self.inner.select_duration.observe_duration(d);
    }

    fn select_send_all_promotion(&self) {
        self.inner.select_send_all_promotion_count.inc();
    }

    fn select_retrieved(&self, n: usize) {
        self.inner.select_retrieved_count.inc_by(n as u64);
    }

    fn select_returned(&self, n: usize) {
        self.inner.select_returned_count.inc_by(n as u64);
    }

    fn select_repair_needed(&self, n: usize) {
        self.inner.select_repair_needed_count.inc_by(n as u64);
    }

    fn delete_call(&self) {
        self.inner.delete_call_count.inc();
    }

    fn delete_record_count(&self, n: usize) {
        self.inner.delete_record_count.inc_by(n as u64);
    }

    fn delete_call_duration(&self, d: Duration) {
        self.inner.delete_call_duration.observe_duration(d);
    }

    fn delete_record_duration(&self, d: Duration) {
        self.inner.delete_record_duration.observe_duration(d);
    }

    fn delete_quorum_failure(&self) {
        self.inner.delete_quorum_failure_count.inc();
    }

    fn repair_call(&self) {
        self.inner.repair_call_count.inc();
    }

    fn repair_request(&self, n: usize) {
        self.inner.repair_request_count.inc_by(n as u64);
    }

    fn repair_discarded(&self, n: usize) {
        self.inner.repair_discarded_count.inc_by(n as u64);
    }

    fn repair_write_success(&self, n: usize) {
        self.inner.repair_write_success_count.inc_by(n as u64);
    }

    fn repair_write_failure(&self, n: usize) {
        self.inner.repair_write_failure_count.inc_by(n as u64);
    }

    fn walk_keys(&self, n: usize) {
        self.inner.walk_keys_count.inc_by(n as u64);
    }
}
