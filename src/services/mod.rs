// ABOUTME: Domain service layer for office staff sessions and profile updates
// ABOUTME: Keeps business rules out of the HTTP handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers parse requests and shape responses; the rules live here.

/// Profile update transaction
pub mod profile;

/// Credential check and token issuance
pub mod session;
