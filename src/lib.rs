// ABOUTME: Main library entry point for the office staff profile API
// ABOUTME: Session login/logout, profile retrieval and update, and change notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Office Staff Server
//!
//! An authenticated REST backend for office staff profiles.
//!
//! ## Features
//!
//! - **Sessions**: bcrypt-verified login issuing an HS256 `JWT` in an `HttpOnly` cookie
//! - **Profiles**: read the caller's profile, update it in one atomic transaction
//! - **Notifications**: `profileUpdated` events pushed to `WebSocket` listeners
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` pool, credential store queries, transaction guard
//! - **Auth**: token issuance/verification and the cookie guard middleware
//! - **Services**: login and profile update rules
//! - **Routes**: thin axum handlers over the services
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use office_staff_server::config::ServerConfig;
//! use office_staff_server::database::Database;
//! use office_staff_server::resources::ServerResources;
//! use office_staff_server::server::OfficeStaffServer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database).await?;
//!     let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
//!     OfficeStaffServer::new(resources).run().await
//! }
//! ```

/// Session token issuance and verification
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// Credential store
pub mod database;

/// Error types and HTTP mapping
pub mod errors;

/// Tracing subscriber setup
pub mod logging;

/// Session guard and CORS middleware
pub mod middleware;

/// Account and profile models
pub mod models;

/// Change notification fan-out
pub mod notifications;

/// Shared server dependencies
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Cookie and password helpers
pub mod security;

/// Router assembly and server lifecycle
pub mod server;

/// Login and profile update business rules
pub mod services;

/// `WebSocket` listener management
pub mod websocket;
