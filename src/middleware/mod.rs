// ABOUTME: HTTP middleware for session authentication and cross-origin access
// ABOUTME: Re-exports the session guard and the CORS layer builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session cookie guard
pub mod auth;
/// Cross-origin layer
pub mod cors;

// Authentication middleware
pub use auth::{require_office_staff, AuthContext};

// CORS configuration
pub use cors::setup_cors;
