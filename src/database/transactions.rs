// ABOUTME: RAII transaction guard that rolls back unless explicitly committed
// ABOUTME: Holds one pooled SQLite connection for the lifetime of a multi-statement update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction scope for the profile update
//!
//! ```text
//! let mut guard = database.begin().await?;
//! staff::set_password_hash(guard.executor()?, id, &hash).await?;
//! staff::update_staff_profile(guard.executor()?, id, &changes).await?;
//! guard.commit().await?;
//! ```
//!
//! Returning early with `?` drops the guard, and `SQLx` rolls the transaction
//! back when the inner `Transaction` is dropped. The pooled connection goes
//! back to the pool on every exit path.

use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// Guard over an open `SQLite` transaction
pub struct TransactionGuard<'c> {
    transaction: Option<Transaction<'c, Sqlite>>,
}

impl<'c> TransactionGuard<'c> {
    /// Wrap a transaction obtained from `pool.begin()`
    #[must_use]
    pub fn new(transaction: Transaction<'c, Sqlite>) -> Self {
        debug!("Transaction opened");
        Self {
            transaction: Some(transaction),
        }
    }

    /// Commit and consume the guard
    ///
    /// # Errors
    ///
    /// Returns a database error if the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot commit"))?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
        debug!("Transaction committed");
        Ok(())
    }

    /// Roll back and consume the guard
    ///
    /// # Errors
    ///
    /// Returns a database error if the rollback fails
    pub async fn rollback(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot rollback"))?;
        tx.rollback()
            .await
            .map_err(|e| AppError::database(format!("Transaction rollback failed: {e}")))?;
        debug!("Transaction rolled back");
        Ok(())
    }

    /// Connection to run statements on inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an internal error if the guard was already consumed
    pub fn executor(&mut self) -> AppResult<&mut SqliteConnection> {
        self.transaction
            .as_deref_mut()
            .ok_or_else(|| AppError::internal("Transaction already consumed"))
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            warn!("Transaction dropped without commit - rolling back");
        }
    }
}
