// ABOUTME: Session guard middleware for protected office staff routes
// ABOUTME: Verifies the `token` cookie and attaches the caller identity to the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::Claims;
use crate::constants::cookies::SESSION_COOKIE;
use crate::errors::AppError;
use crate::models::StaffRole;
use crate::resources::ServerResources;
use crate::security::cookies::get_cookie_value;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tracing::warn;

/// Verified caller identity, as of token issuance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Account id
    pub account_id: i64,
    /// Staff profile id
    pub staff_id: i64,
    /// Username at login time
    pub username: String,
    /// Account role
    pub role: StaffRole,
    /// Department at login time
    pub department: Option<String>,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.id,
            staff_id: claims.staff_id,
            username: claims.username,
            role: claims.role,
            department: claims.department,
        }
    }
}

/// Reject requests without a valid session cookie
///
/// On success the handler can take `Extension<AuthContext>`.
///
/// # Errors
///
/// Returns `AuthRequired` when no `token` cookie is present and
/// `AuthInvalid` when the token fails verification
pub async fn require_office_staff(
    State(resources): State<Arc<ServerResources>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = get_cookie_value(request.headers(), SESSION_COOKIE).filter(|t| !t.is_empty())
    else {
        warn!(path = %request.uri().path(), "Rejected request without session cookie");
        return Err(AppError::auth_required());
    };

    let claims = resources.auth_manager.verify(&token).map_err(|e| {
        warn!(path = %request.uri().path(), "Rejected session token: {e}");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(AuthContext::from(claims));
    Ok(next.run(request).await)
}
