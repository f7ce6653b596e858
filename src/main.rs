// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Jobhunt API Server
//!
//! Tracks job applications per user: cookie-based sessions, owner-scoped
//! CRUD over MongoDB, and pipeline analytics.

use jobhunt::{config::Config, db::MongoDb, services::TokenService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Jobhunt API");

    // Connect to MongoDB and bootstrap indexes
    let db = MongoDb::connect(&config.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    // Build shared state
    let tokens = TokenService::new(&config);
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        tokens,
    });

    // Build router
    let app = jobhunt::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jobhunt=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
