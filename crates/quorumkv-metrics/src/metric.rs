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
//! Counter and histogram handles
//!
//! Both are thin, clonable handles over prometheus collectors. Clones share
//! the same storage, so the handle kept in the facade and the one boxed into
//! the registry always agree.

use prometheus::core::{Collector, Metric as _};
use prometheus::{HistogramOpts, IntCounter, Opts};
use std::fmt;
use std::time::Duration;

use crate::error::{MetricsError, MetricsResult};
use crate::types::{MetricKind, LATENCY_BUCKETS_NANOS};

/// Something that can be handed to [`MetricRegistry::register`](crate::MetricRegistry::register)
pub trait Metric {
    /// Fully qualified metric name
    fn name(&self) -> &str;

    /// Help text written on the `# HELP` line
    fn help(&self) -> &str;

    /// Counter or histogram
    fn kind(&self) -> MetricKind;

    /// Collector sharing storage with this handle, for registration
    fn collector(&self) -> Box<dyn Collector>;
}

/// Monotonic counter
#[derive(Clone)]
pub struct Counter {
    inner: IntCounter,
}

impl Counter {
    /// Create an unregistered counter
    pub fn new(name: &str, help: &str) -> MetricsResult<Self> {
        let inner = IntCounter::with_opts(Opts::new(name, help))
            .map_err(|e| MetricsError::from_prometheus(name, e))?;
        Ok(Self { inner })
    }

    /// Add one
    pub fn inc(&self) {
        self.inner.inc();
    }

    /// Add `n`
    pub fn inc_by(&self, n: u64) {
        self.inner.inc_by(n);
    }

    /// Current value
    pub fn get(&self) -> u64 {
        self.inner.get()
    }
}

impl Metric for Counter {
    fn name(&self) -> &str {
        self.inner.desc().into_iter().next().map_or("", |d| d.fq_name.as_str())
    }

    fn help(&self) -> &str {
        self.inner.desc().into_iter().next().map_or("", |d| d.help.as_str())
    }

    fn kind(&self) -> MetricKind {
        MetricKind::Counter
    }

    fn collector(&self) -> Box<dyn Collector> {
        Box::new(self.inner.clone())
    }
}

/// Latency histogram over nanosecond samples
#[derive(Clone)]
pub struct Histogram {
    inner: prometheus::Histogram,
}

impl Histogram {
    /// Create an unregistered histogram with [`LATENCY_BUCKETS_NANOS`]
    pub fn new(name: &str, help: &str) -> MetricsResult<Self> {
        Self::with_buckets(name, help, LATENCY_BUCKETS_NANOS.to_vec())
    }

    /// Create an unregistered histogram with explicit upper bounds.
    ///
    /// Bounds must be non-empty and strictly increasing. They cannot be
    /// changed once the histogram exists.
    pub fn with_buckets(name: &str, help: &str, buckets: Vec<f64>) -> MetricsResult<Self> {
        if buckets.is_empty() {
            return Err(MetricsError::InvalidMetric {
                name: name.to_string(),
                reason: "at least one bucket bound is required".to_string(),
            });
        }
        let inner = prometheus::Histogram::with_opts(HistogramOpts::new(name, help).buckets(buckets))
            .map_err(|e| MetricsError::from_prometheus(name, e))?;
        Ok(Self { inner })
    }

    /// Record one sample, in nanoseconds
    pub fn observe(&self, nanos: u64) {
        self.inner.observe(nanos as f64);
    }

    /// Record one duration; saturates at `u64::MAX` nanoseconds
    pub fn observe_duration(&self, duration: Duration) {
        self.observe(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX));
    }

    /// Per-bucket counts, total count and sum from one collection
    pub fn snapshot(&self) -> HistogramSnapshot {
        let metric = self.inner.metric();
        let proto = metric.get_histogram();
        let count = proto.get_sample_count();

        let mut buckets = Vec::with_capacity(proto.get_bucket().len() + 1);
        let mut previous = 0;
        for bucket in proto.get_bucket() {
            let cumulative = bucket.get_cumulative_count();
            buckets.push(BucketCount {
                upper_bound: bucket.get_upper_bound(),
                count: cumulative.saturating_sub(previous),
            });
            previous = cumulative;
        }
        buckets.push(BucketCount {
            upper_bound: f64::INFINITY,
            count: count.saturating_sub(previous),
        });

        HistogramSnapshot {
            buckets,
            count,
            sum: proto.get_sample_sum(),
        }
    }
}

impl Metric for Histogram {
    fn name(&self) -> &str {
        self.inner.desc().into_iter().next().map_or("", |d| d.fq_name.as_str())
    }

    fn help(&self) -> &str {
        self.inner.desc().into_iter().next().map_or("", |d| d.help.as_str())
    }

    fn kind(&self) -> MetricKind {
        MetricKind::Histogram
    }

    fn collector(&self) -> Box<dyn Collector> {
        Box::new(self.inner.clone())
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter")
            .field("name", &self.name())
            .field("value", &self.get())
            .finish()
    }
}

impl fmt::Debug for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Histogram")
            .field("name", &self.name())
            .field("count", &self.inner.get_sample_count())
            .finish()
    }
}

/// Samples that fell into one bucket (not cumulative)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketCount {
    /// Inclusive upper bound; `f64::INFINITY` for the overflow bucket
    pub upper_bound: f64,
    /// Samples `v` with `previous bound < v <= upper_bound`
    pub count: u64,
}

/// Point-in-time view of a histogram
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// One entry per bound, ending with the `+Inf` bucket
    pub buckets: Vec<BucketCount>,
    /// Total number of samples
    pub count: u64,
    /// Sum of all samples, in nanoseconds
    pub sum: f64,
}

impl HistogramSnapshot {
    /// Mean sample, or `None` before the first observation
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }

    /// Count of the bucket that holds `value`
    pub fn count_for(&self, value: f64) -> u64 {
        self.buckets
            .iter()
            .find(|b| value <= b.upper_bound)
            .map_or(0, |b| b.count)
    }

    /// Running totals in exposition order (`le` semantics)
    pub fn cumulative(&self) -> Vec<(f64, u64)> {
        self.buckets
            .iter()
            .scan(0u64, |total, b| {
                *total += b.count;
                Some((b.upper_bound, *total))
            })
            .collect()
    }
}
