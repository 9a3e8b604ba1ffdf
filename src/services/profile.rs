// ABOUTME: Profile update transaction for office staff accounts
// ABOUTME: Password change, identity uniqueness and profile fields committed atomically, then announced
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Profile Update
//!
//! All fields of [`UpdateProfileRequest`] are optional. A value that is
//! absent, an empty string, or `0` counts as "not supplied" and leaves the
//! stored value untouched; clients cannot clear a field or set `age` to zero.
//!
//! The three steps (password, identity, profile) run on one transaction. The
//! first failure rolls everything back. Listeners hear about the update only
//! after the commit succeeded.

use crate::database::{staff, AccountChanges, Database, ProfileChanges, TransactionGuard};
use crate::errors::{AppError, AppResult};
use crate::notifications::ChangeNotifier;
use crate::security::password::{hash_password, verify_password};
use serde::Deserialize;
use tracing::{info, warn};

/// Body of `PUT /api/office-staff/update`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New username
    pub username: Option<String>,
    /// New email
    pub email: Option<String>,
    /// New full name
    pub full_name: Option<String>,
    /// New age
    pub age: Option<i64>,
    /// New sex
    pub sex: Option<String>,
    /// New contact number
    pub contact_no: Option<String>,
    /// Current password, required to change the password
    pub current_password: Option<String>,
    /// Replacement password
    pub new_password: Option<String>,
}

/// Password change once both halves were supplied
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: String,
    new: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange([REDACTED])")
    }
}

/// Normalized update: only the supplied fields survive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Password step input
    pub password: Option<PasswordChange>,
    /// Identity step input
    pub account: AccountChanges,
    /// Profile step input
    pub profile: ProfileChanges,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        let password = match (
            supplied_text(request.current_password),
            supplied_text(request.new_password),
        ) {
            (Some(current), Some(new)) => Some(PasswordChange { current, new }),
            _ => None,
        };

        Self {
            password,
            account: AccountChanges {
                username: supplied_text(request.username),
                email: supplied_text(request.email),
            },
            profile: ProfileChanges {
                full_name: supplied_text(request.full_name),
                age: request.age.filter(|age| *age != 0),
                sex: supplied_text(request.sex),
                contact_no: supplied_text(request.contact_no),
            },
        }
    }
}

fn supplied_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Apply an update for `account_id` and announce it
///
/// # Errors
///
/// Business rule failures (`UserNotFound`, `WrongPassword`, `UsernameTaken`,
/// `EmailTaken`) and database errors; in every error case nothing was
/// written and no event was published
pub async fn update_profile(
    database: &Database,
    notifier: &ChangeNotifier,
    bcrypt_cost: u32,
    account_id: i64,
    request: UpdateProfileRequest,
) -> AppResult<()> {
    let update = ProfileUpdate::from(request);
    let mut guard = database.begin().await?;

    if let Err(error) = apply_update(&mut guard, account_id, &update, bcrypt_cost).await {
        if let Err(rollback_error) = guard.rollback().await {
            warn!(account_id, "Rollback after failed profile update failed: {rollback_error}");
        }
        info!(account_id, code = ?error.code, "Profile update rejected: {}", error.message);
        return Err(error);
    }

    guard.commit().await?;
    info!(
        account_id,
        password_changed = update.password.is_some(),
        "Profile updated"
    );

    notifier.profile_updated(account_id);
    Ok(())
}

async fn apply_update(
    guard: &mut TransactionGuard<'_>,
    account_id: i64,
    update: &ProfileUpdate,
    bcrypt_cost: u32,
) -> AppResult<()> {
    if let Some(change) = &update.password {
        let stored_hash = staff::password_hash_for(guard.executor()?, account_id)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        if !verify_password(&change.current, &stored_hash).await? {
            return Err(AppError::wrong_password());
        }

        let new_hash = hash_password(&change.new, bcrypt_cost).await?;
        staff::set_password_hash(guard.executor()?, account_id, &new_hash).await?;
    }

    if !update.account.is_empty() {
        let conflict = staff::find_identity_conflict(
            guard.executor()?,
            account_id,
            update.account.username.as_deref(),
            update.account.email.as_deref(),
        )
        .await?;
        if let Some(conflict) = conflict {
            return Err(conflict.into());
        }
        staff::update_account_identity(guard.executor()?, account_id, &update.account).await?;
    }

    if !update.profile.is_empty() {
        staff::update_staff_profile(guard.executor()?, account_id, &update.profile).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falsy_values_are_not_supplied() {
        let update = ProfileUpdate::from(UpdateProfileRequest {
            username: Some(String::new()),
            email: None,
            full_name: Some(String::new()),
            age: Some(0),
            sex: Some("F".into()),
            contact_no: None,
            current_password: Some("pw1".into()),
            new_password: Some(String::new()),
        });

        assert!(update.password.is_none());
        assert!(update.account.is_empty());
        assert!(!update.profile.is_empty());
        assert_eq!(
            update.profile,
            ProfileChanges {
                sex: Some("F".into()),
                ..ProfileChanges::default()
            }
        );
    }

    #[test]
    fn test_camel_case_body_is_accepted() {
        let request: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "fullName": "Alice Doe",
            "contactNo": "555-0101",
            "currentPassword": "pw1",
            "newPassword": "pw2",
            "age": 31
        }))
        .unwrap();
        let update = ProfileUpdate::from(request);

        assert!(update.password.is_some());
        assert_eq!(update.profile.full_name.as_deref(), Some("Alice Doe"));
        assert_eq!(update.profile.contact_no.as_deref(), Some("555-0101"));
        assert_eq!(update.profile.age, Some(31));
    }

    #[test]
    fn test_password_change_is_redacted_in_debug() {
        let change = PasswordChange {
            current: "pw1".into(),
            new: "pw2".into(),
        };
        let rendered = format!("{change:?}");
        assert!(!rendered.contains("pw1"));
        assert!(!rendered.contains("pw2"));
    }
}
