// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./roofline.toml` >
//! `~/.config/roofline/roofline.toml` > `/etc/roofline/roofline.toml`,
//! with environment variable overrides via the `ROOFLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RooflineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/roofline/roofline.toml` (system-wide)
/// 3. `~/.config/roofline/roofline.toml` (user XDG config)
/// 4. `./roofline.toml` (local directory)
/// 5. `ROOFLINE_*` environment variables
pub fn load_config() -> Result<RooflineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RooflineConfig::default()))
        .merge(Toml::file("/etc/roofline/roofline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("roofline/roofline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("roofline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<RooflineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RooflineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RooflineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RooflineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `ROOFLINE_UPLOADS_MAX_FILE_BYTES` must map to
/// `uploads.max_file_bytes`, not `uploads.max.file.bytes`.
fn env_provider() -> Env {
    Env::prefixed("ROOFLINE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: ROOFLINE_AUTH_TOKEN_TTL_DAYS -> "auth_token_ttl_days"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("uploads_", "uploads.", 1);
        mapped.into()
    })
}
