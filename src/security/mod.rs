// ABOUTME: Security primitives for session cookies and password storage
// ABOUTME: Groups the cookie builders and the bcrypt helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session cookie construction and parsing
pub mod cookies;
/// Bcrypt hashing helpers
pub mod password;
