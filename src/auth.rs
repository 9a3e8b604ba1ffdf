// ABOUTME: JWT session tokens for office staff authentication
// ABOUTME: Issues HS256 tokens carrying the staff identity and verifies them on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Tokens
//!
//! A session token is an HS256 `JWT` signed with the server secret. It embeds
//! the identity snapshot taken at login time. The session guard trusts only the
//! account id from the claims; `GET /me` loads the current profile from storage.

use crate::constants::limits::SECONDS_PER_HOUR;
use crate::errors::{AppError, AppResult};
use crate::models::{StaffAccount, StaffRole};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtValidationError {
    /// Token has expired
    #[error("JWT token expired at {}", .expired_at.format("%Y-%m-%d %H:%M:%S UTC"))]
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature does not match the server secret
    #[error("JWT token signature is invalid: {reason}")]
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is not a decodable `JWT`
    #[error("JWT token is malformed: {details}")]
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        Self::auth_invalid().with_source(error)
    }
}

/// Identity claims embedded in the session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub id: i64,
    /// Staff profile id
    pub staff_id: i64,
    /// Username at login time
    pub username: String,
    /// Account role
    pub role: StaffRole,
    /// Department at login time
    pub department: Option<String>,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

/// Signs and verifies session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry_hours: i64,
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_expiry_hours", &self.token_expiry_hours)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a new manager from the signing secret
    #[must_use]
    pub fn new(secret: &str, token_expiry_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.required_spec_claims.clear();
        validation.required_spec_claims.insert("exp".to_owned());

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_expiry_hours,
        }
    }

    /// Session lifetime in seconds, used for the cookie `Max-Age`
    #[must_use]
    pub const fn session_max_age_secs(&self) -> i64 {
        self.token_expiry_hours * SECONDS_PER_HOUR
    }

    /// Issue a token for the given account
    ///
    /// # Errors
    ///
    /// Returns an internal error if signing fails
    pub fn issue(&self, account: &StaffAccount) -> AppResult<String> {
        self.issue_at(account, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    ///
    /// # Errors
    ///
    /// Returns an internal error if signing fails
    pub fn issue_at(&self, account: &StaffAccount, now: DateTime<Utc>) -> AppResult<String> {
        let expiry = now + Duration::hours(self.token_expiry_hours);
        let claims = Claims {
            id: account.id,
            staff_id: account.staff_id,
            username: account.username.clone(),
            role: account.role,
            department: account.department.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, carries a bad
    /// signature, or is not a valid `JWT`
    pub fn verify(&self, token: &str) -> Result<Claims, JwtValidationError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e, token))
    }

    fn convert_jwt_error(e: &jsonwebtoken::errors::Error, token: &str) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::debug!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired {
                expired_at: Self::peek_expiry(token).unwrap_or_else(Utc::now),
            },
            ErrorKind::InvalidSignature => {
                tracing::warn!("JWT token signature verification failed");
                JwtValidationError::TokenInvalid {
                    reason: "Token signature verification failed".into(),
                }
            }
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }

    /// Read `exp` from a token whose signature is already known to be good
    fn peek_expiry(token: &str) -> Option<DateTime<Utc>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
        DateTime::from_timestamp(data.claims.exp, 0)
    }
}
