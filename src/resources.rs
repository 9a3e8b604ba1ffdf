// ABOUTME: Centralized resource container shared by every request handler
// ABOUTME: Holds the database pool, token manager, change notifier and WebSocket manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and handed to the router as `Arc<ServerResources>`.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::notifications::ChangeNotifier;
use crate::websocket::WebSocketManager;
use std::sync::Arc;

/// Shared server dependencies
#[derive(Clone)]
pub struct ServerResources {
    /// Connection pool handle
    pub database: Database,
    /// Session token signer/verifier
    pub auth_manager: Arc<AuthManager>,
    /// Profile change broadcaster
    pub notifier: ChangeNotifier,
    /// `WebSocket` listener manager
    pub websocket_manager: Arc<WebSocketManager>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire the shared dependencies from configuration
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            &config.auth.jwt_secret,
            config.auth.session_expiry_hours,
        ));
        let notifier = ChangeNotifier::default();
        let websocket_manager = Arc::new(WebSocketManager::new(notifier.clone()));

        Self {
            database,
            auth_manager,
            notifier,
            websocket_manager,
            config,
        }
    }

    /// Whether cookies must carry the `Secure` attribute
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.config.environment.is_production()
    }
}
