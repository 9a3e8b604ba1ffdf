// ABOUTME: Integration tests for the credential store queries and transaction guard
// ABOUTME: Joined lookups, sparse updates, identity conflicts and rollback behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use anyhow::Result;
use common::{create_test_database, seed_alice_and_bob, ALICE_ID, BOB_ID};
use office_staff_server::{
    database::{staff, AccountChanges, IdentityConflict, ProfileChanges},
    errors::ErrorCode,
    models::{NewOfficeStaff, StaffRole},
};

#[tokio::test]
async fn test_find_office_staff_joins_profile() -> Result<()> {
    let database = create_test_database().await?;
    seed_alice_and_bob(&database).await?;

    let alice = database.find_office_staff(ALICE_ID).await?.unwrap();
    assert_eq!(alice.id, ALICE_ID);
    assert_eq!(alice.username, "alice");
    assert_eq!(alice.email, "alice@x.com");
    assert_eq!(alice.role, StaffRole::OfficeStaff);
    assert_eq!(alice.department.as_deref(), Some("Finance"));
    assert_eq!(alice.age, Some(30));

    assert!(database.find_office_staff(42).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_non_staff_accounts_are_invisible() -> Result<()> {
    let database = create_test_database().await?;
    sqlx::query("INSERT INTO users (id, username, email, password, role) VALUES (3, 'root', 'root@x.com', 'x', 'admin')")
        .execute(database.pool())
        .await?;
    sqlx::query("INSERT INTO office_staff (user_id, department) VALUES (3, 'IT')")
        .execute(database.pool())
        .await?;

    assert!(database.find_office_staff(3).await?.is_none());
    assert!(database.find_office_staff_by_username("root").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_create_office_staff_inserts_both_records() -> Result<()> {
    let database = create_test_database().await?;

    let created = database
        .create_office_staff(&NewOfficeStaff {
            username: "carol".into(),
            email: "carol@x.com".into(),
            password_hash: "$2b$04$fixturefixturefixturefixturefixturefixturefixturefix".into(),
            department: Some("HR".into()),
            full_name: Some("Carol Smith".into()),
            ..NewOfficeStaff::default()
        })
        .await?;

    let credentials = database.find_office_staff_by_username("carol").await?.unwrap();
    assert_eq!(credentials.account, created);
    assert!(credentials.password_hash.starts_with("$2b$04$"));
    Ok(())
}

#[tokio::test]
async fn test_create_office_staff_maps_unique_violations() -> Result<()> {
    let database = create_test_database().await?;
    seed_alice_and_bob(&database).await?;

    let duplicate_username = database
        .create_office_staff(&NewOfficeStaff {
            username: "alice".into(),
            email: "other@x.com".into(),
            password_hash: "hash".into(),
            ..NewOfficeStaff::default()
        })
        .await
        .unwrap_err();
    assert_eq!(duplicate_username.code, ErrorCode::UsernameTaken);

    let duplicate_email = database
        .create_office_staff(&NewOfficeStaff {
            username: "someone".into(),
            email: "bob@x.com".into(),
            password_hash: "hash".into(),
            ..NewOfficeStaff::default()
        })
        .await
        .unwrap_err();
    assert_eq!(duplicate_email.code, ErrorCode::EmailTaken);

    // The failed inserts left nothing behind
    assert!(database.find_office_staff_by_username("someone").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_identity_conflict_excludes_self_and_prefers_username() -> Result<()> {
    let database = create_test_database().await?;
    seed_alice_and_bob(&database).await?;
    let mut guard = database.begin().await?;

    let own_values = staff::find_identity_conflict(
        guard.executor()?,
        ALICE_ID,
        Some("alice"),
        Some("alice@x.com"),
    )
    .await?;
    assert_eq!(own_values, None);

    let email_only =
        staff::find_identity_conflict(guard.executor()?, ALICE_ID, None, Some("bob@x.com")).await?;
    assert_eq!(email_only, Some(IdentityConflict::Email));

    let both =
        staff::find_identity_conflict(guard.executor()?, ALICE_ID, Some("bob"), Some("bob@x.com"))
            .await?;
    assert_eq!(both, Some(IdentityConflict::Username));

    guard.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn test_sparse_updates_touch_only_supplied_columns() -> Result<()> {
    let database = create_test_database().await?;
    seed_alice_and_bob(&database).await?;

    let mut guard = database.begin().await?;
    staff::update_account_identity(
        guard.executor()?,
        ALICE_ID,
        &AccountChanges {
            username: None,
            email: Some("alice@new.example".into()),
        },
    )
    .await?;
    staff::update_staff_profile(
        guard.executor()?,
        ALICE_ID,
        &ProfileChanges {
            age: Some(41),
            ..ProfileChanges::default()
        },
    )
    .await?;
    staff::update_staff_profile(guard.executor()?, ALICE_ID, &ProfileChanges::default()).await?;
    guard.commit().await?;

    let alice = database.find_office_staff(ALICE_ID).await?.unwrap();
    assert_eq!(alice.username, "alice");
    assert_eq!(alice.email, "alice@new.example");
    assert_eq!(alice.age, Some(41));
    assert_eq!(alice.full_name.as_deref(), Some("alice fixture"));
    assert_eq!(alice.sex.as_deref(), Some("F"));

    let bob = database.find_office_staff(BOB_ID).await?.unwrap();
    assert_eq!(bob.age, Some(30));
    Ok(())
}

#[tokio::test]
async fn test_identity_update_maps_constraint_violation() -> Result<()> {
    let database = create_test_database().await?;
    seed_alice_and_bob(&database).await?;

    let mut guard = database.begin().await?;
    let error = staff::update_account_identity(
        guard.executor()?,
        ALICE_ID,
        &AccountChanges {
            username: Some("bob".into()),
            email: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::UsernameTaken);
    Ok(())
}

#[tokio::test]
async fn test_dropped_guard_rolls_back() -> Result<()> {
    let database = create_test_database().await?;
    seed_alice_and_bob(&database).await?;

    {
        let mut guard = database.begin().await?;
        staff::set_password_hash(guard.executor()?, ALICE_ID, "replaced").await?;
    }

    let mut guard = database.begin().await?;
    let hash = staff::password_hash_for(guard.executor()?, ALICE_ID).await?.unwrap();
    assert_ne!(hash, "replaced");
    assert!(staff::password_hash_for(guard.executor()?, 404).await?.is_none());
    guard.commit().await?;
    Ok(())
}

#[tokio::test]
async fn test_ping_and_close() -> Result<()> {
    let database = create_test_database().await?;
    database.ping().await?;
    database.close().await;
    assert!(database.ping().await.is_err());
    Ok(())
}
