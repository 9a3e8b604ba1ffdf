// ABOUTME: Credential store queries for office staff accounts and their profiles
// ABOUTME: Joined account lookups on the pool plus transaction-scoped update primitives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::builders::{AccountChanges, ProfileChanges};
use super::Database;
use crate::constants::roles;
use crate::errors::{AppError, AppResult};
use crate::models::{NewOfficeStaff, StaffAccount, StaffCredentials, StaffRole};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

const STAFF_COLUMNS: &str = "u.id, s.id AS staff_id, u.username, u.email, u.role, u.password, \
     s.department, s.full_name, s.age, s.sex, s.contact_no";

/// Which identity field is already held by another account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityConflict {
    /// The requested username belongs to someone else
    Username,
    /// The requested email belongs to someone else
    Email,
}

impl From<IdentityConflict> for AppError {
    fn from(conflict: IdentityConflict) -> Self {
        match conflict {
            IdentityConflict::Username => Self::username_taken(),
            IdentityConflict::Email => Self::email_taken(),
        }
    }
}

impl Database {
    /// Joined account + staff profile view for a staff-role account
    ///
    /// # Errors
    ///
    /// Returns a database error if the query or row decoding fails
    pub async fn find_office_staff(&self, account_id: i64) -> AppResult<Option<StaffAccount>> {
        let sql = format!(
            "SELECT {STAFF_COLUMNS} FROM users u \
             JOIN office_staff s ON s.user_id = u.id \
             WHERE u.id = ? AND u.role = ?"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(roles::OFFICE_STAFF)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_staff_account).transpose()
    }

    /// Login lookup: joined view plus password hash, by username
    ///
    /// # Errors
    ///
    /// Returns a database error if the query or row decoding fails
    pub async fn find_office_staff_by_username(
        &self,
        username: &str,
    ) -> AppResult<Option<StaffCredentials>> {
        let sql = format!(
            "SELECT {STAFF_COLUMNS} FROM users u \
             JOIN office_staff s ON s.user_id = u.id \
             WHERE u.username = ? AND u.role = ?"
        );
        let row = sqlx::query(&sql)
            .bind(username)
            .bind(roles::OFFICE_STAFF)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(|row| {
                Ok(StaffCredentials {
                    account: row_to_staff_account(row)?,
                    password_hash: get_column(row, "password")?,
                })
            })
            .transpose()
    }

    /// Insert an account and its staff profile together
    ///
    /// # Errors
    ///
    /// Returns `UsernameTaken`/`EmailTaken` on a uniqueness violation, or a
    /// database error for any other failure
    pub async fn create_office_staff(&self, staff: &NewOfficeStaff) -> AppResult<StaffAccount> {
        let mut guard = self.begin().await?;

        let account_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, email, password, role) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&staff.username)
        .bind(&staff.email)
        .bind(&staff.password_hash)
        .bind(roles::OFFICE_STAFF)
        .fetch_one(guard.executor()?)
        .await
        .map_err(map_unique_violation)?;

        let staff_id: i64 = sqlx::query_scalar(
            "INSERT INTO office_staff (user_id, department, full_name, age, sex, contact_no) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(account_id)
        .bind(&staff.department)
        .bind(&staff.full_name)
        .bind(staff.age)
        .bind(&staff.sex)
        .bind(&staff.contact_no)
        .fetch_one(guard.executor()?)
        .await?;

        guard.commit().await?;
        debug!(account_id, staff_id, "Created office staff account");

        Ok(StaffAccount {
            id: account_id,
            staff_id,
            username: staff.username.clone(),
            email: staff.email.clone(),
            role: StaffRole::OfficeStaff,
            department: staff.department.clone(),
            full_name: staff.full_name.clone(),
            age: staff.age,
            sex: staff.sex.clone(),
            contact_no: staff.contact_no.clone(),
        })
    }
}

/// Stored password hash for an account, `None` if the account is gone
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn password_hash_for(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> AppResult<Option<String>> {
    let hash = sqlx::query_scalar("SELECT password FROM users WHERE id = ?")
        .bind(account_id)
        .fetch_optional(conn)
        .await?;
    Ok(hash)
}

/// Overwrite the stored password hash
///
/// # Errors
///
/// Returns a database error if the update fails
pub async fn set_password_hash(
    conn: &mut SqliteConnection,
    account_id: i64,
    password_hash: &str,
) -> AppResult<()> {
    sqlx::query("UPDATE users SET password = ? WHERE id = ?")
        .bind(password_hash)
        .bind(account_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Look for another account holding the requested username or email
///
/// Username collisions win over email collisions.
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn find_identity_conflict(
    conn: &mut SqliteConnection,
    account_id: i64,
    username: Option<&str>,
    email: Option<&str>,
) -> AppResult<Option<IdentityConflict>> {
    if username.is_none() && email.is_none() {
        return Ok(None);
    }

    let holders: Vec<(String, String)> = sqlx::query_as(
        "SELECT username, email FROM users WHERE id != ? AND (username = ? OR email = ?)",
    )
    .bind(account_id)
    .bind(username)
    .bind(email)
    .fetch_all(conn)
    .await?;

    let username_taken = username
        .is_some_and(|wanted| holders.iter().any(|(held, _)| held.as_str() == wanted));
    if username_taken {
        return Ok(Some(IdentityConflict::Username));
    }
    if holders.is_empty() {
        Ok(None)
    } else {
        Ok(Some(IdentityConflict::Email))
    }
}

/// Apply username/email changes; no statement when nothing is supplied
///
/// # Errors
///
/// Returns `UsernameTaken`/`EmailTaken` if a concurrent writer claimed the
/// value first, or a database error
pub async fn update_account_identity(
    conn: &mut SqliteConnection,
    account_id: i64,
    changes: &AccountChanges,
) -> AppResult<()> {
    let Some(mut statement) = changes.to_update(account_id) else {
        return Ok(());
    };
    statement
        .build()
        .execute(conn)
        .await
        .map_err(map_unique_violation)?;
    Ok(())
}

/// Apply staff profile changes; no statement when nothing is supplied
///
/// # Errors
///
/// Returns a database error if the update fails
pub async fn update_staff_profile(
    conn: &mut SqliteConnection,
    account_id: i64,
    changes: &ProfileChanges,
) -> AppResult<()> {
    let Some(mut statement) = changes.to_update(account_id) else {
        return Ok(());
    };
    statement.build().execute(conn).await?;
    Ok(())
}

/// Map a `UNIQUE` violation on `users` to the matching business error
fn map_unique_violation(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return if db_error.message().contains("users.email") {
                AppError::email_taken()
            } else {
                AppError::username_taken()
            };
        }
    }
    AppError::from(error)
}

fn row_to_staff_account(row: &SqliteRow) -> AppResult<StaffAccount> {
    let role: String = get_column(row, "role")?;
    let role = StaffRole::parse(&role)
        .ok_or_else(|| AppError::database(format!("Unknown account role: {role}")))?;

    Ok(StaffAccount {
        id: get_column(row, "id")?,
        staff_id: get_column(row, "staff_id")?,
        username: get_column(row, "username")?,
        email: get_column(row, "email")?,
        role,
        department: get_column(row, "department")?,
        full_name: get_column(row, "full_name")?,
        age: get_column(row, "age")?,
        sex: get_column(row, "sex")?,
        contact_no: get_column(row, "contact_no")?,
    })
}

fn get_column<T>(row: &SqliteRow, column: &str) -> AppResult<T>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| AppError::database(format!("Failed to get {column}: {e}")))
}
