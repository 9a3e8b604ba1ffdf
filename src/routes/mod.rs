// ABOUTME: Route module organization for the office staff HTTP endpoints
// ABOUTME: Groups routes by domain; handlers stay thin and delegate to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health check route
pub mod health;
/// Office staff session and profile routes
pub mod office_staff;
/// WebSocket route for change notifications
pub mod websocket;

/// Health route handlers
pub use health::HealthRoutes;
/// Office staff route handlers
pub use office_staff::OfficeStaffRoutes;
/// WebSocket route handlers
pub use websocket::WebSocketRoutes;
