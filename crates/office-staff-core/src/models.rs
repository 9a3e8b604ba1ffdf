// ABOUTME: Account and staff profile data models shared across the workspace
// ABOUTME: Joined account view, login credentials and the role tag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! An office staff member is stored as two records: the account (identity and
//! password hash) and the one-to-one staff profile. [`StaffAccount`] is the
//! joined view every read path returns.

use crate::constants::roles;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag stored on the account record
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    /// Office staff, the only role this API serves
    #[serde(rename = "office_staff")]
    OfficeStaff,
}

impl StaffRole {
    /// Database and token representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OfficeStaff => roles::OFFICE_STAFF,
        }
    }

    /// Parse the stored role tag
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            roles::OFFICE_STAFF => Some(Self::OfficeStaff),
            _ => None,
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joined account + staff profile view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAccount {
    /// Account identifier
    pub id: i64,
    /// Staff profile identifier
    pub staff_id: i64,
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Account role
    pub role: StaffRole,
    /// Department the staff member belongs to
    pub department: Option<String>,
    /// Full display name
    pub full_name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Sex as entered by the staff member
    pub sex: Option<String>,
    /// Contact phone number
    pub contact_no: Option<String>,
}

/// Login lookup result: the joined view plus the stored password hash
#[derive(Debug, Clone)]
pub struct StaffCredentials {
    /// Joined account view
    pub account: StaffAccount,
    /// Bcrypt hash of the account password
    pub password_hash: String,
}

/// Input for creating an office staff account out of band
#[derive(Debug, Clone, Default)]
pub struct NewOfficeStaff {
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Bcrypt hash of the initial password
    pub password_hash: String,
    /// Department
    pub department: Option<String>,
    /// Full display name
    pub full_name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Sex
    pub sex: Option<String>,
    /// Contact phone number
    pub contact_no: Option<String>,
}
