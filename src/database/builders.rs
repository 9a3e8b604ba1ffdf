// ABOUTME: Parameterized sparse UPDATE builders for account and staff profile records
// ABOUTME: Turns a set of optional field changes into one bound statement, or none when empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{Encode, QueryBuilder, Sqlite, Type};

/// Builds `UPDATE <table> SET a = ?, b = ? WHERE <key> = ?` from optional values
///
/// Column and table names are compile-time constants; every value goes
/// through `push_bind`.
pub struct SparseUpdate {
    builder: QueryBuilder<'static, Sqlite>,
    assignments: usize,
}

impl SparseUpdate {
    /// Start an update against `table`
    #[must_use]
    pub fn new(table: &'static str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {table} SET ")),
            assignments: 0,
        }
    }

    /// Assign `column` if a value is present
    #[must_use]
    pub fn set<T>(mut self, column: &'static str, value: Option<T>) -> Self
    where
        T: 'static + Encode<'static, Sqlite> + Type<Sqlite> + Send,
    {
        if let Some(value) = value {
            if self.assignments > 0 {
                self.builder.push(", ");
            }
            self.builder.push(column).push(" = ").push_bind(value);
            self.assignments += 1;
        }
        self
    }

    /// Close the statement with the key predicate; `None` when nothing was assigned
    #[must_use]
    pub fn finish(mut self, key_column: &'static str, key: i64) -> Option<QueryBuilder<'static, Sqlite>> {
        if self.assignments == 0 {
            return None;
        }
        self.builder
            .push(" WHERE ")
            .push(key_column)
            .push(" = ")
            .push_bind(key);
        Some(self.builder)
    }
}

/// Identity fields of the account record to overwrite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    /// New username
    pub username: Option<String>,
    /// New email
    pub email: Option<String>,
}

impl AccountChanges {
    /// Whether no field is supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }

    /// Statement for the `users` row of `account_id`
    #[must_use]
    pub fn to_update(&self, account_id: i64) -> Option<QueryBuilder<'static, Sqlite>> {
        SparseUpdate::new("users")
            .set("username", self.username.clone())
            .set("email", self.email.clone())
            .finish("id", account_id)
    }
}

/// Staff profile fields to overwrite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New full name
    pub full_name: Option<String>,
    /// New age
    pub age: Option<i64>,
    /// New sex
    pub sex: Option<String>,
    /// New contact number
    pub contact_no: Option<String>,
}

impl ProfileChanges {
    /// Whether no field is supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.age.is_none()
            && self.sex.is_none()
            && self.contact_no.is_none()
    }

    /// Statement for the `office_staff` row linked to `account_id`
    #[must_use]
    pub fn to_update(&self, account_id: i64) -> Option<QueryBuilder<'static, Sqlite>> {
        SparseUpdate::new("office_staff")
            .set("full_name", self.full_name.clone())
            .set("age", self.age)
            .set("sex", self.sex.clone())
            .set("contact_no", self.contact_no.clone())
            .finish("user_id", account_id)
    }
}
