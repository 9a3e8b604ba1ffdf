// ABOUTME: Health check route for service monitoring
// ABOUTME: Reports service identity, database reachability and open listener count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::service_names;
use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// `GET /health` body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Open `WebSocket` listener connections
    pub listeners: usize,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        let status = match resources.database.ping().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!("Health check database ping failed: {e}");
                "degraded"
            }
        };

        Json(HealthResponse {
            status: status.to_owned(),
            service: service_names::OFFICE_STAFF_SERVER.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            listeners: resources.websocket_manager.active_connections(),
        })
    }
}
