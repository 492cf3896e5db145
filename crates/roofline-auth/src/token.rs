// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed, time-limited session tokens.
//!
//! A token is `base64url(claims JSON) "." base64url(HMAC-SHA256 tag)` --
//! opaque to clients, verified constant-time, and carrying only
//! `{id, email, exp}`. Any verification failure (missing, malformed, wrong
//! signature, expired) collapses to [`RooflineError::Unauthenticated`]; the
//! distinction is logged, never surfaced.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use roofline_core::RooflineError;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub id: i64,
    /// User email at issuance.
    pub email: String,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Token signer/verifier holding the process-wide secret.
#[derive(Clone)]
pub struct SessionKeys {
    secret: Vec<u8>,
    ttl_seconds: i64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"[redacted]")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl SessionKeys {
    /// Create keys from the configured secret and token lifetime in days.
    pub fn new(secret: &str, ttl_days: u32) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_seconds: i64::from(ttl_days) * 24 * 3600,
        }
    }

    /// Issue a token for the given identity, expiring `ttl_days` from now.
    pub fn issue(&self, id: i64, email: &str) -> Result<String, RooflineError> {
        let claims = SessionClaims {
            id,
            email: email.to_string(),
            exp: Utc::now().timestamp() + self.ttl_seconds,
        };
        self.sign(&claims)
    }

    /// Sign explicit claims. Exposed for expiry tests.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, RooflineError> {
        let payload = serde_json::to_vec(claims)
            .map_err(|e| RooflineError::Internal(format!("claims serialization failed: {e}")))?;
        let encoded = URL_SAFE_NO_PAD.encode(&payload);
        let tag = self.mac()?.chain_update(encoded.as_bytes()).finalize();
        let sig = URL_SAFE_NO_PAD.encode(tag.into_bytes());
        Ok(format!("{encoded}.{sig}"))
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, RooflineError> {
        let (encoded, sig) = token.split_once('.').ok_or_else(|| {
            tracing::debug!("token rejected: missing signature separator");
            RooflineError::Unauthenticated
        })?;

        let sig_bytes = URL_SAFE_NO_PAD.decode(sig).map_err(|_| {
            tracing::debug!("token rejected: signature is not base64url");
            RooflineError::Unauthenticated
        })?;

        // Constant-time comparison via Mac::verify_slice.
        self.mac()?
            .chain_update(encoded.as_bytes())
            .verify_slice(&sig_bytes)
            .map_err(|_| {
                tracing::debug!("token rejected: signature mismatch");
                RooflineError::Unauthenticated
            })?;

        let payload = URL_SAFE_NO_PAD.decode(encoded).map_err(|_| {
            tracing::debug!("token rejected: payload is not base64url");
            RooflineError::Unauthenticated
        })?;
        let claims: SessionClaims = serde_json::from_slice(&payload).map_err(|_| {
            tracing::debug!("token rejected: claims are not valid JSON");
            RooflineError::Unauthenticated
        })?;

        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!(user_id = claims.id, "token rejected: expired");
            return Err(RooflineError::Unauthenticated);
        }

        Ok(claims)
    }

    /// Token lifetime in seconds. Used to size the session cookie `Max-Age`.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    fn mac(&self) -> Result<HmacSha256, RooflineError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| RooflineError::Internal(format!("invalid HMAC key: {e}")))
    }
}
