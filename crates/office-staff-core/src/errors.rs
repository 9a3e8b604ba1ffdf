// ABOUTME: Unified error type and error codes for the office staff API
// ABOUTME: Maps domain failures to HTTP status codes and `{ "message" }` response bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the service returns [`AppResult`]. The
//! [`ErrorCode`] decides the HTTP status; business-rule failures of the profile
//! update are surfaced as 500 with their human-readable message, internal
//! failures as 500 with a generic message while the cause is only logged.

use crate::constants::messages;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication
    /// No session credential was presented
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired,
    /// Session credential failed verification
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid,
    /// Login with unknown username or wrong password
    #[serde(rename = "INVALID_CREDENTIALS")]
    InvalidCredentials,

    // Validation
    /// A required request field is missing or empty
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField,
    /// A request field is present but unusable
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,

    // Resources
    /// The requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,

    // Profile update business rules
    /// The caller's account disappeared during a password change
    #[serde(rename = "USER_NOT_FOUND")]
    UserNotFound,
    /// Current password did not match the stored hash
    #[serde(rename = "WRONG_PASSWORD")]
    WrongPassword,
    /// Username belongs to another account
    #[serde(rename = "USERNAME_TAKEN")]
    UsernameTaken,
    /// Email belongs to another account
    #[serde(rename = "EMAIL_TAKEN")]
    EmailTaken,

    // Internal
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
    /// Database operation failed
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::MissingRequiredField | Self::InvalidInput => 400,
            Self::AuthRequired | Self::AuthInvalid | Self::InvalidCredentials => 401,
            Self::ResourceNotFound => 404,
            // Business rules share the 500 status; clients rely on the message text
            Self::UserNotFound
            | Self::WrongPassword
            | Self::UsernameTaken
            | Self::EmailTaken
            | Self::InternalError
            | Self::DatabaseError => 500,
        }
    }

    /// Whether the message must be hidden from clients
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::InternalError | Self::DatabaseError)
    }

    /// Short description used in log output
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided session credential is invalid",
            Self::InvalidCredentials => "The provided login credentials are invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::UserNotFound => "The account no longer exists",
            Self::WrongPassword => "The current password does not match",
            Self::UsernameTaken => "The username is already in use",
            Self::EmailTaken => "The email is already in use",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Message safe to return to the client
    #[must_use]
    pub fn client_message(&self) -> &str {
        if self.code.is_internal() {
            messages::INTERNAL_ERROR
        } else {
            &self.message
        }
    }

    /// No session credential present
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, messages::NOT_AUTHENTICATED)
    }

    /// Session credential present but rejected
    #[must_use]
    pub fn auth_invalid() -> Self {
        Self::new(ErrorCode::AuthInvalid, messages::INVALID_TOKEN)
    }

    /// Login failure (same error for unknown user and wrong password)
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, messages::INVALID_CREDENTIALS)
    }

    /// Required field missing
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Account vanished while changing the password
    #[must_use]
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, messages::USER_NOT_FOUND)
    }

    /// Current password mismatch
    #[must_use]
    pub fn wrong_password() -> Self {
        Self::new(ErrorCode::WrongPassword, messages::WRONG_PASSWORD)
    }

    /// Username collision with another account
    #[must_use]
    pub fn username_taken() -> Self {
        Self::new(ErrorCode::UsernameTaken, messages::USERNAME_TAKEN)
    }

    /// Email collision with another account
    #[must_use]
    pub fn email_taken() -> Self {
        Self::new(ErrorCode::EmailTaken, messages::EMAIL_TAKEN)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Client-facing message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            message: error.client_message().to_owned(),
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if self.code.is_internal() {
            tracing::error!(
                code = ?self.code,
                error = %self.message,
                source = ?self.source,
                "Request failed with internal error"
            );
        } else {
            tracing::debug!(code = ?self.code, status = status.as_u16(), "Request rejected: {}", self.message);
        }

        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string()).with_source(error)
    }
}
