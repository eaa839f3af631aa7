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
//! Common types for metrics collection

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};

/// Histogram bucket upper bounds for operation latencies, in nanoseconds.
///
/// A 1-2.5-5 series from 1µs to 10s. Every histogram built with
/// [`Histogram::new`](crate::Histogram::new) uses these bounds for its whole
/// lifetime, plus the implicit `+Inf` bucket.
pub const LATENCY_BUCKETS_NANOS: [f64; 22] = [
    1_000.0,
    2_500.0,
    5_000.0,
    10_000.0,
    25_000.0,
    50_000.0,
    100_000.0,
    250_000.0,
    500_000.0,
    1_000_000.0,
    2_500_000.0,
    5_000_000.0,
    10_000_000.0,
    25_000_000.0,
    50_000_000.0,
    100_000_000.0,
    250_000_000.0,
    500_000_000.0,
    1_000_000_000.0,
    2_500_000_000.0,
    5_000_000_000.0,
    10_000_000_000.0,
];

/// Route that always answers `OK`, reserved next to the exposition path
pub const HEALTH_PATH: &str = "/health";

/// Configuration for the metrics facade and its HTTP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Port for metrics HTTP server
    pub port: u16,

    /// Enable metrics collection
    pub enabled: bool,

    /// Bind address (default: 127.0.0.1)
    pub bind_address: String,

    /// Path the exposition handler is mounted at
    pub path: String,

    /// Prefix prepended to every facade metric name
    pub prefix: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: 9090,
            enabled: false,
            bind_address: "127.0.0.1".to_string(),
            path: "/metrics".to_string(),
            prefix: "quorumkv_".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create new config with port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            enabled: true,
            ..Default::default()
        }
    }

    /// Parse a config from TOML; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> MetricsResult<Self> {
        let config: MetricsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get bind address with port
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Check that the path can be mounted and the prefix yields valid names
    pub fn validate(&self) -> MetricsResult<()> {
        if !self.path.starts_with('/') {
            return Err(MetricsError::InvalidConfig(format!(
                "path must start with '/': {}",
                self.path
            )));
        }
        if self.path == HEALTH_PATH {
            return Err(MetricsError::InvalidConfig(format!(
                "path {} is reserved for the health check",
                HEALTH_PATH
            )));
        }
        if !is_valid_prefix(&self.prefix) {
            return Err(MetricsError::InvalidConfig(format!(
                "prefix is not a valid metric name prefix: {}",
                self.prefix
            )));
        }
        Ok(())
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`, or empty
fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        Some(_) => false,
    }
}

/// Kind of a registered metric, as written on its `# TYPE` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Monotonic accumulator
    Counter,
    /// Bucketed distribution with running sum and count
    Histogram,
}

impl MetricKind {
    /// Get string label for Prometheus
    pub fn as_label(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Histogram => "histogram",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert_eq!(config.port, 9090);
        assert!(!config.enabled);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.path, "/metrics");
        assert_eq!(config.prefix, "quorumkv_");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_metrics_config_with_port() {
        let config = MetricsConfig::with_port(8080);
        assert_eq!(config.port, 8080);
        assert!(config.enabled);
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_from_toml_partial() {
        let config = MetricsConfig::from_toml_str(
            r#"
            enabled = true
            path = "/debug/metrics"
            prefix = "farm_a_"
            "#,
        )
        .unwrap();
        assert!(config.enabled);
        assert_eq!(config.path, "/debug/metrics");
        assert_eq!(config.prefix, "farm_a_");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = MetricsConfig::from_toml_str("port = \"nine\"").unwrap_err();
        assert!(matches!(err, MetricsError::ConfigParse(_)));
    }

    #[test]
    fn test_validate_path() {
        for path in ["metrics", HEALTH_PATH] {
            let config = MetricsConfig {
                path: path.to_string(),
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(MetricsError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_validate_prefix() {
        let with_prefix = |prefix: &str| MetricsConfig {
            prefix: prefix.to_string(),
            ..Default::default()
        };
        for ok in ["", "test_", "cluster:a_", "_x"] {
            assert!(with_prefix(ok).validate().is_ok(), "{ok:?} should be accepted");
        }
        for bad in ["1abc", "has space", "dash-ed", "dot."] {
            assert!(with_prefix(bad).validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_latency_buckets_strictly_increasing() {
        assert!(LATENCY_BUCKETS_NANOS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(LATENCY_BUCKETS_NANOS[0], 1_000.0);
        assert_eq!(LATENCY_BUCKETS_NANOS[21], 10_000_000_000.0);
    }

    #[test]
    fn test_metric_kind_labels() {
        assert_eq!(MetricKind::Counter.as_label(), "counter");
        assert_eq!(MetricKind::Histogram.as_label(), "histogram");
    }
}
