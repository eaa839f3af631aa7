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
//! Instrumentation points of the storage system
//!
//! The storage layer depends only on [`Instrumentation`]. Production code
//! passes a [`MetricsInstrumentation`](crate::MetricsInstrumentation); tests
//! and benchmarks can pass [`NoopInstrumentation`].

use std::time::Duration;

/// One method per observable event in the storage lifecycle.
///
/// Implementations must be cheap and must never block or fail: they are
/// called inline from insert, select, delete, repair and walk paths.
pub trait Instrumentation: Send + Sync {
    /// An insert call started
    fn insert_call(&self);
    /// Records written by an insert call
    fn insert_record_count(&self, n: usize);
    /// Latency of a whole insert call
    fn insert_call_duration(&self, d: Duration);
    /// Latency of one record within an insert call
    fn insert_record_duration(&self, d: Duration);
    /// An insert did not reach quorum
    fn insert_quorum_failure(&self);

    /// A select call started
    fn select_call(&self);
    /// Keys requested by a select call
    fn select_keys(&self, n: usize);
    /// Clusters a select call was sent to
    fn select_send_to(&self, n: usize);
    /// Time until the first cluster answered
    fn select_first_response_duration(&self, d: Duration);
    /// A cluster failed during a select
    fn select_partial_error(&self);
    /// Time spent waiting on clusters
    fn select_blocking_duration(&self, d: Duration);
    /// Time spent outside of cluster waits
    fn select_overhead_duration(&self, d: Duration);
    /// Latency of a whole select call
    fn select_duration(&self, d: Duration);
    /// A select was promoted to send-all
    fn select_send_all_promotion(&self);
    /// Records retrieved from clusters
    fn select_retrieved(&self, n: usize);
    /// Records returned to the client
    fn select_returned(&self, n: usize);
    /// Repairs detected by a select
    fn select_repair_needed(&self, n: usize);

    /// A delete call started
    fn delete_call(&self);
    /// Records deleted by a delete call
    fn delete_record_count(&self, n: usize);
    /// Latency of a whole delete call
    fn delete_call_duration(&self, d: Duration);
    /// Latency of one record within a delete call
    fn delete_record_duration(&self, d: Duration);
    /// A delete did not reach quorum
    fn delete_quorum_failure(&self);

    /// A repair call started
    fn repair_call(&self);
    /// Repair requests issued
    fn repair_request(&self, n: usize);
    /// Repairs dropped by rate or buffer limits
    fn repair_discarded(&self, n: usize);
    /// Repair writes that succeeded
    fn repair_write_success(&self, n: usize);
    /// Repair writes that failed
    fn repair_write_failure(&self, n: usize);

    /// Keys visited by the background walker
    fn walk_keys(&self, n: usize);
}

/// Instrumentation that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstrumentation;

impl Instrumentation for NoopInstrumentation {
    fn insert_call(&self) {}
    fn insert_record_count(&self, _n: usize) {}
    fn insert_call_duration(&self, _d: Duration) {}
    fn insert_record_duration(&self, _d: Duration) {}
    fn insert_quorum_failure(&self) {}
    fn select_call(&self) {}
    fn select_keys(&self, _n: usize) {}
    fn select_send_to(&self, _n: usize) {}
    fn select_first_response_duration(&self, _d: Duration) {}
    fn select_partial_error(&self) {}
    fn select_blocking_duration(&self, _d: Duration) {}
    fn select_overhead_duration(&self, _d: Duration) {}
    fn select_duration(&self, _d: Duration) {}
    fn select_send_all_promotion(&self) {}
    fn select_retrieved(&self, _n: usize) {}
    fn select_returned(&self, _n: usize) {}
    fn select_repair_needed(&self, _n: usize) {}
    fn delete_call(&self) {}
    fn delete_record_count(&self, _n: usize) {}
    fn delete_call_duration(&self, _d: Duration) {}
    fn delete_record_duration(&self, _d: Duration) {}
    fn delete_quorum_failure(&self) {}
    fn repair_call(&self) {}
    fn repair_request(&self, _n: usize) {}
    fn repair_discarded(&self, _n: usize) {}
    fn repair_write_success(&self, _n: usize) {}
    fn repair_write_failure(&self, _n: usize) {}
    fn walk_keys(&self, _n: usize) {}
}
