// ABOUTME: HTTP-level tests for the office staff routes
// ABOUTME: Login cookies, guard rejections, profile fetch, update responses and logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use axum::{http::StatusCode, Router};
use chrono::Utc;
use common::{
    create_test_app, create_test_resources_with, json_request, response_json, seed_alice_and_bob,
    session_token, set_cookie_header, test_config, ALICE_ID, TEST_JWT_SECRET,
};
use office_staff_server::{
    auth::AuthManager, config::Environment, models::StaffRole, server::OfficeStaffServer,
};
use serde_json::json;
use tower::ServiceExt;

async fn login_as(app: &Router, username: &str, password: &str) -> Result<String> {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/office-staff/login",
            Some(&json!({"username": username, "password": password})),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    session_token(&response)
}

#[tokio::test]
async fn test_login_sets_session_cookie_with_claims() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/office-staff/login",
            Some(&json!({"username": "alice", "password": "pw1"})),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie_header(&response)?;
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(!cookie.contains("Secure"), "development cookies are not Secure");

    let token = session_token(&response)?;
    let claims = AuthManager::new(TEST_JWT_SECRET, 24).verify(&token).unwrap();
    assert_eq!(claims.id, ALICE_ID);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.department.as_deref(), Some("Finance"));
    assert_eq!(claims.role, StaffRole::OfficeStaff);
    let remaining = claims.exp - Utc::now().timestamp();
    assert!((86_300..=86_400).contains(&remaining), "expiry {remaining}s out");

    let body = response_json(response).await?;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["id"], ALICE_ID);
    assert_eq!(body["user"]["staff_id"], claims.staff_id);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["department"], "Finance");
    assert!(body["user"].get("email").is_none());
    Ok(())
}

#[tokio::test]
async fn test_login_failures_share_one_message() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    let mut messages = Vec::new();
    for (username, password) in [("alice", "wrong"), ("nobody", "pw1")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/office-staff/login",
                Some(&json!({"username": username, "password": password})),
                None,
            ))
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get("set-cookie").is_none());
        messages.push(response_json(response).await?["message"].clone());
    }

    assert_eq!(messages[0], "Invalid credentials");
    assert_eq!(messages[0], messages[1]);
    Ok(())
}

#[tokio::test]
async fn test_login_requires_both_fields() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    for body in [
        Some(json!({"username": "alice"})),
        Some(json!({"username": "", "password": "pw1"})),
        None,
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/office-staff/login", body.as_ref(), None))
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response_json(response).await?["message"],
            "Username and password are required"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_me_requires_session_cookie() -> Result<()> {
    let (resources, app) = create_test_app().await?;

    let missing = app
        .clone()
        .oneshot(json_request("GET", "/api/office-staff/me", None, None))
        .await?;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response_json(missing).await?["message"], "Not authenticated");

    let forged = AuthManager::new("some-other-secret", 24);
    let alice = resources.database.find_office_staff(ALICE_ID).await?.unwrap();
    let forged_token = forged.issue(&alice)?;

    for token in [forged_token.as_str(), "garbage"] {
        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/office-staff/me", None, Some(token)))
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response_json(response).await?["message"],
            "Invalid or expired token"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_expired_session_is_rejected() -> Result<()> {
    let (resources, app) = create_test_app().await?;
    let alice = resources.database.find_office_staff(ALICE_ID).await?.unwrap();
    let stale = resources
        .auth_manager
        .issue_at(&alice, Utc::now() - chrono::Duration::hours(25))?;

    let response = app
        .oneshot(json_request("GET", "/api/office-staff/me", None, Some(&stale)))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_me_returns_stored_profile() -> Result<()> {
    let (_resources, app) = create_test_app().await?;
    let token = login_as(&app, "alice", "pw1").await?;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/office-staff/me", None, Some(&token)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await?;
    assert_eq!(
        body,
        json!({
            "user": {
                "id": ALICE_ID,
                "username": "alice",
                "email": "alice@x.com",
                "department": "Finance",
                "full_name": "alice fixture",
                "age": 30,
                "sex": "F",
                "contact_no": "555-0100"
            }
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_me_for_deleted_account_is_not_found() -> Result<()> {
    let (resources, app) = create_test_app().await?;
    let token = login_as(&app, "alice", "pw1").await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(ALICE_ID)
        .execute(resources.database.pool())
        .await?;

    let response = app
        .oneshot(json_request("GET", "/api/office-staff/me", None, Some(&token)))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await?["message"], "User not found");
    Ok(())
}

#[tokio::test]
async fn test_update_success_and_business_errors() -> Result<()> {
    let (resources, app) = create_test_app().await?;
    let token = login_as(&app, "alice", "pw1").await?;
    let mut events = resources.notifier.subscribe();

    let ok = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/office-staff/update",
            Some(&json!({"fullName": "Alice Doe", "age": 0, "contactNo": "555-0199"})),
            Some(&token),
        ))
        .await?;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(
        response_json(ok).await?["message"],
        "Profile updated successfully"
    );
    assert!(events.try_recv().is_ok());

    let taken = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/office-staff/update",
            Some(&json!({"email": "bob@x.com"})),
            Some(&token),
        ))
        .await?;
    assert_eq!(taken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response_json(taken).await?,
        json!({"message": "Email already registered"})
    );
    assert!(events.try_recv().is_err());

    let alice = resources.database.find_office_staff(ALICE_ID).await?.unwrap();
    assert_eq!(alice.full_name.as_deref(), Some("Alice Doe"));
    assert_eq!(alice.age, Some(30));
    assert_eq!(alice.email, "alice@x.com");
    Ok(())
}

#[tokio::test]
async fn test_update_requires_session() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/office-staff/update",
            Some(&json!({"fullName": "Mallory"})),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_password_change_over_http() -> Result<()> {
    let (_resources, app) = create_test_app().await?;
    let token = login_as(&app, "alice", "pw1").await?;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/office-staff/update",
            Some(&json!({"currentPassword": "pw1", "newPassword": "pw2"})),
            Some(&token),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    login_as(&app, "alice", "pw2").await?;
    let stale = app
        .oneshot(json_request(
            "POST",
            "/api/office-staff/login",
            Some(&json!({"username": "alice", "password": "pw1"})),
            None,
        ))
        .await?;
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_logout_always_clears_cookie() -> Result<()> {
    let (_resources, app) = create_test_app().await?;

    for token in [None, Some("whatever")] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/office-staff/logout", None, token))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie_header(&response)?;
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
        assert_eq!(
            response_json(response).await?["message"],
            "Logged out successfully"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_health_reports_database() -> Result<()> {
    let (resources, app) = create_test_app().await?;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/health", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "office-staff-server");
    assert_eq!(body["listeners"], 0);

    resources.database.close().await;
    let degraded = app.oneshot(json_request("GET", "/health", None, None)).await?;
    assert_eq!(response_json(degraded).await?["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn test_production_cookies_are_secure() -> Result<()> {
    let mut config = test_config();
    config.environment = Environment::Production;
    let resources = create_test_resources_with(config).await?;
    seed_alice_and_bob(&resources.database).await?;
    let app = OfficeStaffServer::new(resources).router();

    let login = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/office-staff/login",
            Some(&json!({"username": "bob", "password": "pw-bob"})),
            None,
        ))
        .await?;
    assert_eq!(login.status(), StatusCode::OK);
    assert!(set_cookie_header(&login)?.contains("; Secure"));

    let logout = app
        .oneshot(json_request("POST", "/api/office-staff/logout", None, None))
        .await?;
    assert!(set_cookie_header(&logout)?.contains("; Secure"));
    Ok(())
}
