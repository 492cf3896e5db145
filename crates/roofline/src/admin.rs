// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot maintenance commands: `seed` and `backfill`.

use roofline_config::RooflineConfig;
use roofline_core::RooflineError;
use roofline_storage::Database;

/// Runs the `roofline seed` command. No-op when listings already exist.
pub async fn run_seed(config: &RooflineConfig) -> Result<(), RooflineError> {
    let db = Database::open(&config.storage.database_path).await?;
    let inserted = roofline_storage::seed::seed_sample_properties(&db).await?;
    if inserted == 0 {
        tracing::info!("database already has listings; nothing seeded");
    } else {
        tracing::info!(inserted, "sample listings seeded");
    }
    db.close().await
}

/// Runs the `roofline backfill` command, deriving missing location, type,
/// and category values on existing rows.
pub async fn run_backfill(config: &RooflineConfig) -> Result<(), RooflineError> {
    let db = Database::open(&config.storage.database_path).await?;
    let updated = roofline_storage::backfill::backfill_properties(&db).await?;
    tracing::info!(updated, "backfill complete");
    db.close().await
}
