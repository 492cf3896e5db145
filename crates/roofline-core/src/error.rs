// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Roofline listing platform.

use thiserror::Error;

/// The primary error type used across all Roofline crates.
///
/// Validation and authentication failures are detected before any store
/// mutation; storage failures carry their source for logging at the service
/// boundary and are never forwarded verbatim to clients.
#[derive(Debug, Error)]
pub enum RooflineError {
    /// Missing or malformed required input (maps to HTTP 400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown email or wrong password. The two cases are merged so the
    /// response does not leak which part was wrong (HTTP 400).
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, mis-signed, or expired session token (HTTP 401).
    #[error("not authenticated")]
    Unauthenticated,

    /// Registration attempted with an email that already has an account
    /// (HTTP 409). Produced from the store's uniqueness constraint, so a
    /// raced pre-check still surfaces as this variant.
    #[error("email already in use")]
    EmailInUse,

    /// Requested entity does not exist (HTTP 404).
    #[error("{0} not found")]
    NotFound(String),

    /// Storage backend errors (connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RooflineError {
    /// Shorthand for a `Validation` error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
