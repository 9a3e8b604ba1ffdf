// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, fixture staff accounts, resources and HTTP request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `office_staff_server`

use anyhow::{anyhow, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
};
use office_staff_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    resources::ServerResources,
    security::password::hash_password,
    server::OfficeStaffServer,
};
use serde_json::Value;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Signing secret shared by every test server
pub const TEST_JWT_SECRET: &str = "office-staff-test-secret-0123456789";

/// Cheapest bcrypt cost, keeps tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Fixture: alice, account id 7, password `pw1`
pub const ALICE_ID: i64 = 7;
/// Fixture: bob, account id 9, owns `bob@x.com`
pub const BOB_ID: i64 = 9;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for an isolated in-memory server
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.database.url = DatabaseUrl::Memory;
    config.auth.jwt_secret = TEST_JWT_SECRET.to_owned();
    config.auth.bcrypt_cost = TEST_BCRYPT_COST;
    config
}

/// Fresh in-memory database with the schema applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&test_config().database).await?)
}

/// Resources over a fresh database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with(test_config()).await
}

/// Resources over a fresh database with a custom configuration
pub async fn create_test_resources_with(config: ServerConfig) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let database = Database::new(&config.database).await?;
    Ok(Arc::new(ServerResources::new(database, Arc::new(config))))
}

/// Seeded resources plus the assembled router
pub async fn create_test_app() -> Result<(Arc<ServerResources>, axum::Router)> {
    let resources = create_test_resources().await?;
    seed_alice_and_bob(&resources.database).await?;
    let router = OfficeStaffServer::new(resources.clone()).router();
    Ok((resources, router))
}

/// Insert a staff account with a fixed id
pub async fn insert_staff(
    database: &Database,
    id: i64,
    username: &str,
    email: &str,
    password: &str,
    department: &str,
) -> Result<()> {
    let password_hash = hash_password(password, TEST_BCRYPT_COST).await?;
    sqlx::query(
        "INSERT INTO users (id, username, email, password, role) VALUES (?, ?, ?, ?, 'office_staff')",
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .execute(database.pool())
    .await?;

    sqlx::query(
        "INSERT INTO office_staff (user_id, department, full_name, age, sex, contact_no) \
         VALUES (?, ?, ?, 30, 'F', '555-0100')",
    )
    .bind(id)
    .bind(department)
    .bind(format!("{username} fixture"))
    .execute(database.pool())
    .await?;
    Ok(())
}

/// alice (id 7, `pw1`, Finance) and bob (id 9, `pw-bob`, Records)
pub async fn seed_alice_and_bob(database: &Database) -> Result<()> {
    insert_staff(database, ALICE_ID, "alice", "alice@x.com", "pw1", "Finance").await?;
    insert_staff(database, BOB_ID, "bob", "bob@x.com", "pw-bob", "Records").await?;
    Ok(())
}

/// Stored bcrypt hash for an account
pub async fn stored_password_hash(database: &Database, id: i64) -> Result<String> {
    let hash = sqlx::query_scalar("SELECT password FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(database.pool())
        .await?;
    Ok(hash)
}

/// Build a request with an optional JSON body and session cookie
pub fn json_request(method: &str, uri: &str, body: Option<&Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid test request")
}

/// Decode a JSON response body
pub async fn response_json(response: Response<Body>) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Raw `Set-Cookie` header of a response
pub fn set_cookie_header(response: &Response<Body>) -> Result<String> {
    Ok(response
        .headers()
        .get(header::SET_COOKIE)
        .ok_or_else(|| anyhow!("Set-Cookie header missing"))?
        .to_str()?
        .to_owned())
}

/// Value of the `token` cookie set by a response
pub fn session_token(response: &Response<Body>) -> Result<String> {
    let cookie = set_cookie_header(response)?;
    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.trim().strip_prefix("token="))
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("token cookie missing in {cookie}"))
}
