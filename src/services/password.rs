// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing.
//!
//! Passwords are stored only as salted bcrypt hashes; verification
//! recomputes the hash from the candidate and compares in constant time.

use bcrypt::{hash, verify};

use crate::error::{AppError, Result};

/// bcrypt work factor for stored password hashes.
const BCRYPT_COST: u32 = 12;

/// Hash a cleartext password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Check a candidate password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    verify(password, password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        // Low cost to keep the test fast; production hashing uses BCRYPT_COST.
        let hashed = bcrypt::hash("hunter2-but-longer", 4).unwrap();

        assert!(verify_password("hunter2-but-longer", &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("whatever", "not-a-bcrypt-hash").is_err());
    }
}
