// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential handling for Roofline: argon2id password hashing and
//! HMAC-SHA256 signed, time-limited session tokens.
//!
//! Tokens are stateless -- nothing is persisted server-side, so a token
//! stays valid until natural expiry even after logout. That tradeoff is
//! deliberate; revocation would need a denylist with its own lifecycle.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{SessionClaims, SessionKeys};
