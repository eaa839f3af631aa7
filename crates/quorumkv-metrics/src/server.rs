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
//! HTTP server for the metrics endpoint
//!
//! Serves the registry's text exposition at the configured path, plus a
//! `/health` probe.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::registry::{Exposition, MetricRegistry};
use crate::types::{MetricsConfig, HEALTH_PATH};

/// HTTP server exposing a [`MetricRegistry`]
#[derive(Clone)]
pub struct MetricsServer {
    registry: MetricRegistry,
    config: MetricsConfig,
}

impl MetricsServer {
    /// Create a new metrics server on `port` with the default path
    pub fn new(registry: MetricRegistry, port: u16) -> Self {
        Self {
            registry,
            config: MetricsConfig::with_port(port),
        }
    }

    /// Create a new metrics server with custom configuration
    pub fn with_config(registry: MetricRegistry, config: MetricsConfig) -> Self {
        Self { registry, config }
    }

    /// Get the bind address for the server
    pub fn bind_address(&self) -> String {
        self.config.socket_addr()
    }

    /// Routes for the exposition path and the health probe
    pub fn router(&self) -> Router {
        exposition_router(self.registry.clone(), &self.config.path)
            .route(HEALTH_PATH, get(health_handler))
    }

    /// Start the metrics server
    ///
    /// Runs until the listener fails. Returns immediately when the config is
    /// disabled. Typically spawned as a background task.
    pub async fn serve(self) -> anyhow::Result<()> {
        if !self.config.enabled {
            info!("Metrics server disabled");
            return Ok(());
        }
        self.config.validate()?;

        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        self.serve_with_listener(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        let app = self.router();
        let local = listener.local_addr()?;
        info!("Metrics server listening on http://{}{}", local, self.config.path);

        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Metrics server error: {}", e))
    }
}

/// Router serving only the exposition of `registry` at `path`.
///
/// For mounting into a host application's router next to its own routes.
pub fn exposition_router(registry: MetricRegistry, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(registry)
}

/// Renders every registered metric as `text/plain`
async fn metrics_handler(State(registry): State<MetricRegistry>) -> Response {
    debug!("Serving metrics");

    match registry.render() {
        Ok(exposition) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, Exposition::CONTENT_TYPE)],
            exposition.into_string(),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
