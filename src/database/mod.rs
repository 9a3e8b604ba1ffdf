// ABOUTME: Database handle owning the SQLite connection pool and the schema bootstrap
// ABOUTME: Exposes the credential store, the transaction guard and the sparse update builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Credential Store
//!
//! Accounts live in `users`, the one-to-one staff profile in `office_staff`.
//! The pool is created once at startup, shared through `ServerResources`, and
//! closed after the HTTP server drains.

/// Sparse `UPDATE` statement builders
pub mod builders;
/// Account and staff profile queries
pub mod staff;
/// Rollback-on-drop transaction guard
pub mod transactions;

pub use builders::{AccountChanges, ProfileChanges};
pub use staff::IdentityConflict;
pub use transactions::TransactionGuard;

use crate::config::DatabaseConfig;
use crate::errors::AppResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Shared handle to the connection pool
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool and create the schema if needed
    ///
    /// # Errors
    ///
    /// Returns a database error if the URL is invalid, the first connection
    /// cannot be opened, or schema creation fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));
        if config.url.is_memory() {
            // Each in-memory connection is its own database; keep exactly one alive
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        info!(
            database = %config.url,
            max_connections = pool.options().get_max_connections(),
            "Database pool opened"
        );

        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS office_staff (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                department TEXT,
                full_name TEXT,
                age INTEGER,
                sex TEXT,
                contact_no TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_role ON users(role)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a connection and open a transaction on it
    ///
    /// # Errors
    ///
    /// Returns a database error if no connection frees up within the acquire
    /// timeout or `BEGIN` fails
    pub async fn begin(&self) -> AppResult<TransactionGuard<'static>> {
        let transaction = self.pool.begin().await?;
        Ok(TransactionGuard::new(transaction))
    }

    /// Round-trip `SELECT 1`
    ///
    /// # Errors
    ///
    /// Returns a database error if the database is unreachable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection, waiting for checked-out ones
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
