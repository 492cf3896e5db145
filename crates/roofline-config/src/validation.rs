// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup validation for loaded configuration.
//!
//! Hard failures stop the process before anything binds or opens; soft
//! findings (like the insecure default session secret) are logged as
//! warnings so development still works out of the box.

use roofline_core::RooflineError;

use crate::model::{INSECURE_DEFAULT_SECRET, RooflineConfig};

/// Validate a loaded configuration.
///
/// Returns every hard error found rather than stopping at the first, so a
/// misconfigured deployment can be fixed in one pass.
pub fn validate(config: &RooflineConfig) -> Result<(), Vec<RooflineError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(RooflineError::Config("server.host must not be empty".into()));
    }
    if config.storage.database_path.trim().is_empty() {
        errors.push(RooflineError::Config(
            "storage.database_path must not be empty".into(),
        ));
    }
    if config.auth.secret.is_empty() {
        errors.push(RooflineError::Config(
            "auth.secret must not be empty (set ROOFLINE_AUTH_SECRET)".into(),
        ));
    }
    if config.auth.token_ttl_days == 0 {
        errors.push(RooflineError::Config(
            "auth.token_ttl_days must be at least 1".into(),
        ));
    }
    if config.uploads.max_file_bytes == 0 {
        errors.push(RooflineError::Config(
            "uploads.max_file_bytes must be at least 1".into(),
        ));
    }
    if !config.uploads.public_prefix.starts_with('/') {
        errors.push(RooflineError::Config(
            "uploads.public_prefix must start with '/'".into(),
        ));
    }

    if config.auth.secret == INSECURE_DEFAULT_SECRET {
        tracing::warn!(
            "auth.secret is the insecure development default -- override it in any real deployment"
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
