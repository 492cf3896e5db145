// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `roofline serve` command implementation.
//!
//! Opens the database, builds the session keys and upload store from
//! configuration, and runs the gateway until it exits.

use roofline_auth::SessionKeys;
use roofline_config::RooflineConfig;
use roofline_core::RooflineError;
use roofline_gateway::{AppState, ServerConfig, UploadStore, start_server};
use roofline_storage::Database;

/// Runs the `roofline serve` command.
pub async fn run_serve(config: RooflineConfig) -> Result<(), RooflineError> {
    let db = Database::open(&config.storage.database_path).await?;
    let keys = SessionKeys::new(&config.auth.secret, config.auth.token_ttl_days);
    let uploads = UploadStore::new(
        &config.uploads.dir,
        config.uploads.max_file_bytes,
        config.uploads.public_prefix.clone(),
    )?;

    let state = AppState {
        db: db.clone(),
        keys,
        uploads,
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        client_origin: config.server.client_origin.clone(),
    };

    tracing::info!(
        database = %config.storage.database_path,
        uploads = %config.uploads.dir,
        "starting Roofline"
    );

    let result = start_server(&server_config, state).await;
    db.close().await?;
    result
}
