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
//! Metrics registry and text exposition

use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Registry, TextEncoder};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{MetricsError, MetricsResult};
use crate::metric::{Counter, Histogram, Metric};

/// Registry of named metrics for one process (or one test).
///
/// Cheap to clone; clones see the same set of metrics. Names are unique:
/// registering a second metric under a taken name fails, which callers treat
/// as a startup error.
#[derive(Clone)]
pub struct MetricRegistry {
    registry: Registry,
}

impl MetricRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Make `metric` visible to [`render`](Self::render)
    pub fn register(&self, metric: &impl Metric) -> MetricsResult<()> {
        let name = metric.name();
        if let Err(e) = self.registry.register(metric.collector()) {
            let err = MetricsError::from_prometheus(name, e);
            warn!(metric = name, "Failed to register metric: {}", err);
            return Err(err);
        }

        debug!(metric = name, kind = metric.kind().as_label(), "Registered metric");
        Ok(())
    }

    /// Create and register a counter
    pub fn counter(&self, name: &str, help: &str) -> MetricsResult<Counter> {
        let counter = Counter::new(name, help)?;
        self.register(&counter)?;
        Ok(counter)
    }

    /// Create and register a latency histogram
    pub fn histogram(&self, name: &str, help: &str) -> MetricsResult<Histogram> {
        let histogram = Histogram::new(name, help)?;
        self.register(&histogram)?;
        Ok(histogram)
    }

    /// Current state of every metric, sorted by name
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render every metric in the Prometheus text format.
    ///
    /// Stanzas are ordered by metric name. Each metric is read on its own,
    /// so concurrent updates are never blocked.
    pub fn render(&self) -> MetricsResult<Exposition> {
        let families = self.gather();
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();

        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| MetricsError::Encode(e.to_string()))?;
        let text = String::from_utf8(buffer).map_err(|e| MetricsError::Encode(e.to_string()))?;

        debug!(families = families.len(), bytes = text.len(), "Rendered metrics");
        Ok(Exposition { text })
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendered text exposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exposition {
    text: String,
}

impl Exposition {
    /// Content type the text is encoded in
    pub const CONTENT_TYPE: &'static str = prometheus::TEXT_FORMAT;

    /// Lines of the exposition, produced on demand
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }

    /// Borrow the full text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take the full text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Exposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = MetricRegistry::new();
        assert!(registry.gather().is_empty());
        assert_eq!(registry.render().unwrap().as_str(), "");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let registry = MetricRegistry::new();
        registry.counter("kv_dup_count", "First.").unwrap();

        let err = registry.counter("kv_dup_count", "Second.").unwrap_err();
        assert!(matches!(err, MetricsError::DuplicateMetric(ref n) if n == "kv_dup_count"));

        let err = registry.histogram("kv_dup_count", "Third.").unwrap_err();
        assert!(matches!(err, MetricsError::DuplicateMetric(_)));
    }

    #[test]
    fn test_distinct_names_render_independently() {
        let registry = MetricRegistry::new();
        let a = registry.counter("kv_a_count", "A.").unwrap();
        let b = registry.counter("kv_b_count", "B.").unwrap();
        a.inc_by(3);
        b.inc();

        let text = registry.render().unwrap().into_string();
        assert!(text.contains("# HELP kv_a_count A.\n"));
        assert!(text.contains("# TYPE kv_a_count counter\n"));
        assert!(text.contains("\nkv_a_count 3\n"));
        assert!(text.contains("\nkv_b_count 1\n"));
    }

    #[test]
    fn test_registries_are_independent() {
        let first = MetricRegistry::new();
        let second = MetricRegistry::new();
        first.counter("kv_same_count", "Same.").unwrap();
        assert!(second.counter("kv_same_count", "Same.").is_ok());
    }

    #[test]
    fn test_render_order_is_by_name() {
        let registry = MetricRegistry::new();
        registry.counter("kv_zeta_count", "Z.").unwrap();
        registry.histogram("kv_alpha_nanoseconds", "A.").unwrap();
        registry.counter("kv_mid_count", "M.").unwrap();

        let exposition = registry.render().unwrap();
        let names: Vec<&str> = exposition
            .lines()
            .filter_map(|l| l.strip_prefix("# TYPE "))
            .filter_map(|l| l.split(' ').next())
            .collect();
        assert_eq!(names, vec!["kv_alpha_nanoseconds", "kv_mid_count", "kv_zeta_count"]);

        assert_eq!(exposition, registry.render().unwrap());
    }

    #[test]
    fn test_histogram_stanza() {
        let registry = MetricRegistry::new();
        let histogram = registry.histogram("kv_latency_nanoseconds", "Latency.").unwrap();
        histogram.observe(1_500_000);

        let exposition = registry.render().unwrap();
        let text = exposition.as_str();
        assert!(text.contains("# TYPE kv_latency_nanoseconds histogram\n"));
        assert!(text.contains("kv_latency_nanoseconds_bucket{le=\"1000000\"} 0\n"));
        assert!(text.contains("kv_latency_nanoseconds_bucket{le=\"2500000\"} 1\n"));
        assert!(text.contains("kv_latency_nanoseconds_bucket{le=\"+Inf\"} 1\n"));
        assert!(text.contains("kv_latency_nanoseconds_sum 1500000\n"));
        assert!(text.contains("kv_latency_nanoseconds_count 1\n"));
        assert_eq!(exposition.to_string(), text);
    }
}
