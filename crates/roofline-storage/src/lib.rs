// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Roofline listing platform.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed query
//! modules for users, properties, and dashboard statistics.

pub mod backfill;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;

pub use database::Database;
pub use models::{NewProperty, NewUser};
