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
//! Error types for metric registration, rendering and configuration

use thiserror::Error;

/// Errors produced while building or exposing metrics.
///
/// None of these can arise from recording an event: counters and histograms
/// are bound before the facade is handed out, so the hot path is infallible.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// A metric with this name is already registered
    #[error("metric already registered: {0}")]
    DuplicateMetric(String),

    /// The metric could not be constructed (bad name, bad buckets, ...)
    #[error("invalid metric {name}: {reason}")]
    InvalidMetric {
        /// Name the metric was declared with
        name: String,
        /// Underlying reason reported by the metrics backend
        reason: String,
    },

    /// The registry could not be encoded into the text exposition format
    #[error("failed to encode metrics: {0}")]
    Encode(String),

    /// Configuration values are inconsistent
    #[error("invalid metrics configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed
    #[error("failed to parse metrics configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetricsError {
    /// Map a prometheus error raised while building or registering `name`
    pub(crate) fn from_prometheus(name: &str, err: prometheus::Error) -> Self {
        match err {
            prometheus::Error::AlreadyReg => MetricsError::DuplicateMetric(name.to_string()),
            other => MetricsError::InvalidMetric {
                name: name.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// Result alias for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
