// ABOUTME: Core types and constants for the office staff profile API
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Office Staff Core
//!
//! Foundation crate providing shared types and constants for the office staff
//! profile API. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Cookie names, roles, token lifetimes and user-facing messages
//! - **models**: Account and staff profile types shared by storage and routes

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Account and staff profile data models
pub mod models;
