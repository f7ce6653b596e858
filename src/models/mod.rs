// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod application;
pub mod user;

pub use application::{Application, ApplicationPatch, ApplicationStatus};
pub use user::User;
