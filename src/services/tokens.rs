// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token service.
//!
//! Issues and verifies the access/refresh token pair. The two token kinds
//! are independent signing domains with separate secrets: a token signed
//! for one domain never verifies in the other. Tokens are never stored
//! server-side, so revocation before natural expiry is impossible.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, Result};

/// Access token lifetime.
pub const ACCESS_TTL_MINUTES: i64 = 15;
/// Refresh token lifetime.
pub const REFRESH_TTL_DAYS: i64 = 14;

/// Claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's ObjectId as a hex string
    pub sub: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Signing keys for both token domains.
#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
        }
    }

    fn issue(&self, key: &EncodingKey, sub: &str, email: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token signing failed: {}", e)))
    }

    fn verify(&self, key: &DecodingKey, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }

    /// Sign a short-lived access token for per-request authorization.
    pub fn issue_access(&self, sub: &str, email: &str) -> Result<String> {
        self.issue(
            &self.access_encoding,
            sub,
            email,
            Duration::minutes(ACCESS_TTL_MINUTES),
        )
    }

    /// Sign a long-lived refresh token, good only for minting a new pair.
    pub fn issue_refresh(&self, sub: &str, email: &str) -> Result<String> {
        self.issue(
            &self.refresh_encoding,
            sub,
            email,
            Duration::days(REFRESH_TTL_DAYS),
        )
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        self.verify(&self.access_decoding, token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims> {
        self.verify(&self.refresh_decoding, token)
    }
}
