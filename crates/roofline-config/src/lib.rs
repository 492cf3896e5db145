// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered TOML + environment configuration for the Roofline service.
//!
//! Figment merges compiled defaults, the XDG config hierarchy, a local
//! `roofline.toml`, and `ROOFLINE_*` environment variables; a validation
//! pass then rejects unusable values before the service starts.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AuthConfig, RooflineConfig, ServerConfig, StorageConfig, UploadConfig};
pub use validation::validate;

use roofline_core::RooflineError;

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<RooflineConfig, Vec<RooflineError>> {
    let config = load_config().map_err(|e| vec![RooflineError::Config(e.to_string())])?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load configuration from an explicit file and validate it. Environment
/// overrides still apply on top.
pub fn load_and_validate_from_path(
    path: &std::path::Path,
) -> Result<RooflineConfig, Vec<RooflineError>> {
    let config =
        load_config_from_path(path).map_err(|e| vec![RooflineError::Config(e.to_string())])?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_validate_str_roundtrip() {
        let config = load_config_from_str("[server]\nport = 1234").unwrap();
        validate(&config).unwrap();
        assert_eq!(config.server.port, 1234);
    }
}
