// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jobhunt::config::Config;
use jobhunt::db::MongoDb;
use jobhunt::routes::create_router;
use jobhunt::services::TokenService;
use jobhunt::AppState;
use std::sync::Arc;

/// Check if a test MongoDB is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGODB_TEST_URI").is_ok()
}

/// Skip test with message if no test MongoDB is available.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: MONGODB_TEST_URI not set");
            return;
        }
    };
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> MongoDb {
    MongoDb::new_mock()
}

/// Create a real test database connection.
#[allow(dead_code)]
pub async fn test_db() -> MongoDb {
    let uri = std::env::var("MONGODB_TEST_URI").expect("MONGODB_TEST_URI must be set");
    MongoDb::connect(&uri)
        .await
        .expect("Failed to connect to test MongoDB")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

/// Same, but with a caller-supplied config (e.g. secure cookies on).
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let tokens = TokenService::new(&config);
    let state = Arc::new(AppState {
        config,
        db: test_db_offline(),
        tokens,
    });

    (create_router(state.clone()), state)
}

/// Serve the app on an ephemeral port against the real test database.
/// Returns the base URL for an `ApiClient`.
#[allow(dead_code)]
pub async fn serve_test_app() -> (String, Arc<AppState>) {
    let config = Config::default();
    let tokens = TokenService::new(&config);
    let db = test_db().await;
    let state = Arc::new(AppState {
        config,
        db,
        tokens,
    });

    let app = create_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    (format!("http://{}", addr), state)
}

/// Unique email per test run, so suites can share a database.
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("Clock before Unix epoch")
        .as_nanos();
    format!("{}+{}@example.com", prefix, nanos)
}
