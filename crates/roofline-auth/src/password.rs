// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id password hashing.
//!
//! Uses the argon2 crate's PHC-string API with the default parameters
//! (Argon2id v19, 19 MiB, t=2, p=1): deliberately slow enough -- low tens
//! of milliseconds on commodity hardware -- to resist brute force without
//! hurting interactive latency.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use roofline_core::RooflineError;

/// Hash a plaintext password into an argon2id PHC string with a fresh
/// random salt.
pub fn hash_password(plain: &str) -> Result<String, RooflineError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| RooflineError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
///
/// A malformed stored hash and a wrong password both verify as false; the
/// caller maps that to its merged invalid-credentials failure.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("stored password hash is malformed: {e}");
            false
        }
    }
}
