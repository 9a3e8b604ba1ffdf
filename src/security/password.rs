// ABOUTME: Bcrypt password hashing and verification off the async runtime
// ABOUTME: Runs the CPU-bound bcrypt work on the blocking thread pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};

/// Hash a password with the given bcrypt cost
///
/// # Errors
///
/// Returns an internal error if bcrypt fails or the blocking task panics
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, cost)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    })
    .await
    .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// Check a plaintext password against a stored bcrypt hash
///
/// # Errors
///
/// Returns an internal error if the stored hash is unreadable or the blocking
/// task panics
pub async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || {
        bcrypt::verify(password, &hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))
    })
    .await
    .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("pw1", 4).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("pw1", &hash).await.unwrap());
        assert!(!verify_password("pw2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_an_error() {
        assert!(verify_password("pw1", "not-a-bcrypt-hash").await.is_err());
    }
}
