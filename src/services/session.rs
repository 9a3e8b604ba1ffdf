// ABOUTME: Login flow verifying staff credentials and issuing session tokens
// ABOUTME: Same rejection for unknown usernames and wrong passwords
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthManager;
use crate::constants::messages;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::StaffAccount;
use crate::security::password::verify_password;
use serde::Deserialize;
use tracing::{info, warn};

/// Body of `POST /api/office-staff/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: Option<String>,
    /// Plaintext password
    pub password: Option<String>,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed session token for the cookie
    pub token: String,
    /// Account the token was issued for
    pub account: StaffAccount,
}

/// Verify credentials and issue a session token
///
/// # Errors
///
/// - `MissingRequiredField` if username or password is absent or empty
/// - `InvalidCredentials` if the username is unknown or the password is wrong
/// - internal/database errors otherwise
pub async fn login(
    database: &Database,
    auth_manager: &AuthManager,
    request: LoginRequest,
) -> AppResult<LoginOutcome> {
    let (Some(username), Some(password)) = (
        request.username.filter(|u| !u.is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::missing_field(messages::LOGIN_FIELDS_REQUIRED));
    };

    info!("Login attempt for staff user: {username}");

    let Some(credentials) = database.find_office_staff_by_username(&username).await? else {
        warn!("Login failed for staff user {username}: unknown username");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(&password, &credentials.password_hash).await? {
        warn!("Login failed for staff user {username}: wrong password");
        return Err(AppError::invalid_credentials());
    }

    let token = auth_manager.issue(&credentials.account)?;
    info!(account_id = credentials.account.id, "Staff user {username} logged in");

    Ok(LoginOutcome {
        token,
        account: credentials.account,
    })
}
