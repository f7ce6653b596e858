// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod analytics;
pub mod password;
pub mod tokens;

pub use analytics::{summarize, StatusCounts, Summary};
pub use password::{hash_password, verify_password};
pub use tokens::{Claims, TokenService};
