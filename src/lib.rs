// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Jobhunt: track job applications through the hiring pipeline.
//!
//! This crate provides the backend API for storing per-user application
//! records and computing pipeline analytics, plus a typed HTTP client
//! for driving the API.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MongoDb;
use services::TokenService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MongoDb,
    pub tokens: TokenService,
}
