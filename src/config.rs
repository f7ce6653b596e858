//! Application configuration loaded from environment variables.
//!
//! The two JWT signing secrets are required and must be independent of
//! each other; the rest of the surface has development-friendly defaults.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// MongoDB connection string (database name taken from the URI path)
    pub mongodb_uri: String,
    /// Allowed cross-origin caller (the frontend)
    pub cors_origin: String,
    /// Signing secret for short-lived access tokens
    pub access_token_secret: String,
    /// Signing secret for long-lived refresh tokens
    pub refresh_token_secret: String,
    /// Set the Secure flag on auth cookies (requires HTTPS)
    pub cookie_secure: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            mongodb_uri: "mongodb://localhost:27017/jobhunt_test".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
            access_token_secret: "test_access_secret_32_bytes_min!".to_string(),
            refresh_token_secret: "test_refresh_secret_32_bytes_m!".to_string(),
            cookie_secure: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017/jobhunt".to_string()),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            access_token_secret: env::var("JWT_ACCESS_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_ACCESS_SECRET"))?,
            refresh_token_secret: env::var("JWT_REFRESH_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_REFRESH_SECRET"))?,
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "true")
                .unwrap_or(false),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
