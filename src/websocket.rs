// ABOUTME: WebSocket fan-out of change events to browser listeners
// ABOUTME: Each connection subscribes to the change notifier and forwards events as JSON text frames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `WebSocket` transport for [`ChangeNotifier`] events
//!
//! Listeners are anonymous and receive every event; client frames other than
//! `Close` are ignored.

use crate::notifications::{ChangeEvent, ChangeNotifier};
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use uuid::Uuid;

/// Manages listener connections
#[derive(Clone)]
pub struct WebSocketManager {
    notifier: ChangeNotifier,
    active_connections: Arc<AtomicUsize>,
}

impl WebSocketManager {
    /// Create a manager forwarding events from `notifier`
    #[must_use]
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self {
            notifier,
            active_connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of open listener connections
    #[must_use]
    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::Relaxed)
    }

    /// Serve one upgraded connection until either side closes
    pub async fn handle_connection(&self, ws: WebSocket) {
        let connection_id = Uuid::new_v4();
        let (mut ws_tx, mut ws_rx) = ws.split();
        let mut events = self.notifier.subscribe();

        let open = self.active_connections.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(%connection_id, open, "WebSocket listener connected");

        // Forward events until the client goes away
        let forward_task = tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(%connection_id, skipped, "WebSocket listener lagged, events dropped");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let Some(frame) = encode_event(&event) else {
                    continue;
                };
                if ws_tx.send(frame).await.is_err() {
                    break;
                }
            }
        });

        while let Some(msg) = ws_rx.next().await {
            match msg {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }

        forward_task.abort();
        let open = self
            .active_connections
            .fetch_sub(1, Ordering::Relaxed)
            .saturating_sub(1);
        debug!(%connection_id, open, "WebSocket listener disconnected");
    }
}

fn encode_event(event: &ChangeEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json)),
        Err(e) => {
            warn!(?event, "Failed to serialize change event: {e}");
            None
        }
    }
}
