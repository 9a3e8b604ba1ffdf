// ABOUTME: WebSocket route for real-time profile change notifications
// ABOUTME: Upgrades `/ws` and hands the socket to the WebSocket manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::websocket::WebSocketManager;
use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::{debug, info};

/// WebSocket routes implementation
pub struct WebSocketRoutes;

impl WebSocketRoutes {
    /// Create the WebSocket route with injected `WebSocketManager`
    pub fn routes(manager: Arc<WebSocketManager>) -> Router {
        Router::new()
            .route("/ws", get(Self::handle_websocket))
            .with_state(manager)
    }

    /// Upgrade the connection and subscribe it to change events
    async fn handle_websocket(
        ws: WebSocketUpgrade,
        State(manager): State<Arc<WebSocketManager>>,
    ) -> impl IntoResponse {
        info!("New WebSocket connection request");

        ws.on_upgrade(move |socket: WebSocket| async move {
            debug!("WebSocket upgraded, delegating to manager");
            manager.handle_connection(socket).await;
        })
    }
}
