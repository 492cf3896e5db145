// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Roofline service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Every section is optional and defaults to values
//! suitable for local development.

use serde::{Deserialize, Serialize};

/// Top-level Roofline configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with `ROOFLINE_*`
/// environment variable overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RooflineConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Image upload settings.
    #[serde(default)]
    pub uploads: UploadConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser client origin allowed by CORS (credentialed requests).
    #[serde(default = "default_client_origin")]
    pub client_origin: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            client_origin: default_client_origin(),
            log_level: default_log_level(),
        }
    }
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Session token and password hashing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HMAC signing secret for session tokens.
    ///
    /// Defaults to an insecure development value; any real deployment must
    /// override it (`ROOFLINE_AUTH_SECRET` or the `[auth]` section).
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Session token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_days: default_token_ttl_days(),
        }
    }
}

/// Image upload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Directory uploaded images are written to.
    #[serde(default = "default_upload_dir")]
    pub dir: String,

    /// Per-file size cap in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Public URL prefix uploaded images are served under.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_file_bytes: default_max_file_bytes(),
            public_prefix: default_public_prefix(),
        }
    }
}

/// The insecure development signing secret. Startup validation warns loudly
/// when this value is still in effect.
pub const INSECURE_DEFAULT_SECRET: &str = "dev_secret";

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7542
}

fn default_client_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_path() -> String {
    "data/roofline.db".to_string()
}

fn default_secret() -> String {
    INSECURE_DEFAULT_SECRET.to_string()
}

fn default_token_ttl_days() -> u32 {
    7
}

fn default_upload_dir() -> String {
    "data/images/houses".to_string()
}

fn default_max_file_bytes() -> u64 {
    8 * 1024 * 1024
}

fn default_public_prefix() -> String {
    "/images/houses".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development_friendly() {
        let config = RooflineConfig::default();
        assert_eq!(config.server.port, 7542);
        assert_eq!(config.auth.token_ttl_days, 7);
        assert_eq!(config.auth.secret, INSECURE_DEFAULT_SECRET);
        assert_eq!(config.uploads.max_file_bytes, 8 * 1024 * 1024);
        assert_eq!(config.uploads.public_prefix, "/images/houses");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
            [server]
            port = 8080
            bogus_key = true
        "#;
        let result: Result<RooflineConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
