// ABOUTME: Route handlers for the office staff session and profile REST API
// ABOUTME: Login, logout, current profile and profile update under /api/office-staff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Office staff routes
//!
//! `me` and `update` sit behind [`require_office_staff`]; `login` and
//! `logout` are public. Every error body is `{"message": ...}`.

use crate::{
    constants::messages,
    errors::AppError,
    middleware::{require_office_staff, AuthContext},
    models::StaffAccount,
    resources::ServerResources,
    security::cookies::{clear_session_cookie, set_session_cookie},
    services::{
        profile::{self, UpdateProfileRequest},
        session::{self, LoginRequest},
    },
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Plain `{ message }` body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Profile view returned by `GET /me`
#[derive(Debug, Serialize, Deserialize)]
pub struct StaffProfileResponse {
    /// Account id
    pub id: i64,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Department
    pub department: Option<String>,
    /// Full name
    pub full_name: Option<String>,
    /// Age
    pub age: Option<i64>,
    /// Sex
    pub sex: Option<String>,
    /// Contact number
    pub contact_no: Option<String>,
}

impl From<StaffAccount> for StaffProfileResponse {
    fn from(account: StaffAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            department: account.department,
            full_name: account.full_name,
            age: account.age,
            sex: account.sex,
            contact_no: account.contact_no,
        }
    }
}

/// `GET /me` body
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    /// Current profile
    pub user: StaffProfileResponse,
}

/// Non-sensitive identity echoed after login, for display only
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    /// Account id
    pub id: i64,
    /// Staff profile id
    pub staff_id: i64,
    /// Username
    pub username: String,
    /// Department
    pub department: Option<String>,
}

/// `POST /login` body
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Outcome message
    pub message: String,
    /// Logged-in identity
    pub user: SessionUser,
}

/// Office staff routes implementation
pub struct OfficeStaffRoutes;

impl OfficeStaffRoutes {
    /// Create all office staff routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let protected = Router::new()
            .route("/api/office-staff/me", get(Self::handle_me))
            .route("/api/office-staff/update", put(Self::handle_update))
            .route_layer(middleware::from_fn_with_state(
                resources.clone(),
                require_office_staff,
            ));

        Router::new()
            .route("/api/office-staff/login", post(Self::handle_login))
            .route("/api/office-staff/logout", post(Self::handle_logout))
            .merge(protected)
            .with_state(resources)
    }

    /// Return the caller's stored profile
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        Extension(auth): Extension<AuthContext>,
    ) -> Result<Response, AppError> {
        let account = resources
            .database
            .find_office_staff(auth.account_id)
            .await?
            .ok_or_else(|| AppError::not_found(messages::USER_NOT_FOUND))?;

        Ok((
            StatusCode::OK,
            Json(MeResponse {
                user: account.into(),
            }),
        )
            .into_response())
    }

    /// Apply a profile update for the caller
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Extension(auth): Extension<AuthContext>,
        payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload.map_err(|rejection| {
            debug!("Rejected profile update body: {rejection}");
            AppError::invalid_input(rejection.body_text())
        })?;

        profile::update_profile(
            &resources.database,
            &resources.notifier,
            resources.config.auth.bcrypt_cost,
            auth.account_id,
            request,
        )
        .await?;

        Ok((
            StatusCode::OK,
            Json(MessageResponse::new(messages::PROFILE_UPDATED)),
        )
            .into_response())
    }

    /// Verify credentials and set the session cookie
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        // An unreadable body is treated like one without credentials
        let request = payload.map(|Json(request)| request).unwrap_or_default();

        let outcome = session::login(&resources.database, &resources.auth_manager, request).await?;

        let mut headers = HeaderMap::new();
        set_session_cookie(
            &mut headers,
            &outcome.token,
            resources.auth_manager.session_max_age_secs(),
            resources.secure_cookies(),
        );

        let body = LoginResponse {
            message: messages::LOGIN_SUCCESSFUL.to_owned(),
            user: SessionUser {
                id: outcome.account.id,
                staff_id: outcome.account.staff_id,
                username: outcome.account.username,
                department: outcome.account.department,
            },
        };

        Ok((StatusCode::OK, headers, Json(body)).into_response())
    }

    /// Expire the session cookie; never fails
    async fn handle_logout(State(resources): State<Arc<ServerResources>>) -> Response {
        let mut headers = HeaderMap::new();
        clear_session_cookie(&mut headers, resources.secure_cookies());

        (
            StatusCode::OK,
            headers,
            Json(MessageResponse::new(messages::LOGGED_OUT)),
        )
            .into_response()
    }
}
