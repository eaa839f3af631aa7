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
//! quorumkv metrics
//!
//! Counters and latency histograms for the storage system's operations,
//! and an HTTP endpoint that exposes them for scraping.
//!
//! # Features
//!
//! - **Instrumentation facade**: one method per storage event, each bound to
//!   its own metric at construction, so recording is O(1) and allocation-free
//! - **Explicit registries**: no global state; several facades coexist in one
//!   registry under distinct name prefixes
//! - **Prometheus text exposition**: stable, name-ordered output
//! - **HTTP Endpoint**: Axum-based endpoint at a configurable path
//!
//! # Example
//!
//! ```ignore
//! use quorumkv_metrics::{Instrumentation, MetricRegistry, MetricsInstrumentation, MetricsServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = MetricRegistry::new();
//!     let instr = MetricsInstrumentation::new(&registry, "quorumkv_")?;
//!
//!     let server = MetricsServer::new(registry.clone(), 9090);
//!     tokio::spawn(async move {
//!         server.serve().await
//!     });
//!
//!     instr.insert_call();
//!     instr.insert_record_count(12);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod facade;
pub mod instrumentation;
pub mod metric;
pub mod registry;
pub mod server;
pub mod types;

pub use error::{MetricsError, MetricsResult};
pub use facade::MetricsInstrumentation;
pub use instrumentation::{Instrumentation, NoopInstrumentation};
pub use metric::{BucketCount, Counter, Histogram, HistogramSnapshot, Metric};
pub use registry::{Exposition, MetricRegistry};
pub use server::{exposition_router, MetricsServer};
pub use types::{MetricKind, MetricsConfig, LATENCY_BUCKETS_NANOS};
