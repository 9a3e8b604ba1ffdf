// ABOUTME: Re-export of the unified error type from office-staff-core
// ABOUTME: AppError, ErrorCode and AppResult used by every fallible operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use office_staff_core::errors::*;
