// ABOUTME: Re-exports account and staff profile models from office-staff-core
// ABOUTME: Ensures StaffAccount/StaffRole are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use office_staff_core::models::*;
