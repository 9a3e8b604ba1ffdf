// ABOUTME: Re-export of shared constants from office-staff-core
// ABOUTME: Cookie names, role tags, limits and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use office_staff_core::constants::*;
