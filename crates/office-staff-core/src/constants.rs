// ABOUTME: Application-wide constants grouped by domain
// ABOUTME: Cookie attributes, role tags, token lifetimes and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identity used in logs and the health endpoint
pub mod service_names {
    /// Service name
    pub const OFFICE_STAFF_SERVER: &str = "office-staff-server";
}

/// Role tags stored on the account record
pub mod roles {
    /// The only role this API serves
    pub const OFFICE_STAFF: &str = "office_staff";
}

/// Session cookie settings
pub mod cookies {
    /// Name of the cookie carrying the signed session credential
    pub const SESSION_COOKIE: &str = "token";
    /// Cookie path
    pub const PATH: &str = "/";
}

/// Limits and lifetimes
pub mod limits {
    /// Session credential lifetime in hours
    pub const SESSION_EXPIRY_HOURS: i64 = 24;
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: i64 = 3600;
    /// Default connection pool capacity
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    /// Default seconds a caller waits for a pooled connection
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
    /// Capacity of the profile change broadcast channel
    pub const NOTIFICATION_CHANNEL_CAPACITY: usize = 256;
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
}

/// Real-time event names
pub mod events {
    /// Emitted after a committed profile update
    pub const PROFILE_UPDATED: &str = "profileUpdated";
}

/// User-facing messages returned in `{ "message": ... }` bodies
pub mod messages {
    /// Login succeeded
    pub const LOGIN_SUCCESSFUL: &str = "Login successful";
    /// Logout always succeeds
    pub const LOGGED_OUT: &str = "Logged out successfully";
    /// Profile update committed
    pub const PROFILE_UPDATED: &str = "Profile updated successfully";
    /// Missing login fields
    pub const LOGIN_FIELDS_REQUIRED: &str = "Username and password are required";
    /// Login failure, identical for unknown user and wrong password
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
    /// No session cookie
    pub const NOT_AUTHENTICATED: &str = "Not authenticated";
    /// Session cookie failed verification
    pub const INVALID_TOKEN: &str = "Invalid or expired token";
    /// Account lookup failed
    pub const USER_NOT_FOUND: &str = "User not found";
    /// Password change with a wrong current password
    pub const WRONG_PASSWORD: &str = "Current password is incorrect";
    /// Another account owns the requested username
    pub const USERNAME_TAKEN: &str = "Username already taken";
    /// Another account owns the requested email
    pub const EMAIL_TAKEN: &str = "Email already registered";
    /// Generic body for internal failures
    pub const INTERNAL_ERROR: &str = "Internal server error";
}
