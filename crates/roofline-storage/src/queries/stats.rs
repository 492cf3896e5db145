// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate queries backing the dashboard statistics report.
//!
//! Daily groupings are sparse (only days with at least one row appear);
//! densifying the series into a fixed 30-day window happens in the gateway's
//! stats module. Window cutoffs arrive as `YYYY-MM-DD` strings computed by
//! the caller from a single `as_of` instant.

use roofline_core::{CategoryCount, DailyCount, PublicUser, RooflineError};
use rusqlite::params;

use crate::database::Database;

/// Total user count.
pub async fn count_users(db: &Database) -> Result<i64, RooflineError> {
    count(db, "SELECT COUNT(*) FROM users").await
}

/// Total property count.
pub async fn count_properties(db: &Database) -> Result<i64, RooflineError> {
    count(db, "SELECT COUNT(*) FROM properties").await
}

async fn count(db: &Database, sql: &'static str) -> Result<i64, RooflineError> {
    db.connection()
        .call(move |conn| Ok(conn.query_row(sql, [], |row| row.get(0))?))
        .await
        .map_err(crate::database::map_tr_err)
}

/// Sparse per-day user creation counts on or after `since` (`YYYY-MM-DD`),
/// ascending by day.
pub async fn users_per_day(db: &Database, since: &str) -> Result<Vec<DailyCount>, RooflineError> {
    per_day(db, "users", since).await
}

/// Sparse per-day property creation counts on or after `since`.
pub async fn properties_per_day(
    db: &Database,
    since: &str,
) -> Result<Vec<DailyCount>, RooflineError> {
    per_day(db, "properties", since).await
}

async fn per_day(
    db: &Database,
    table: &'static str,
    since: &str,
) -> Result<Vec<DailyCount>, RooflineError> {
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT strftime('%Y-%m-%d', created_at) AS day, COUNT(*)
                 FROM {table}
                 WHERE strftime('%Y-%m-%d', created_at) >= ?1
                 GROUP BY day
                 ORDER BY day ASC"
            ))?;
            let rows = stmt.query_map(params![since], |row| {
                Ok(DailyCount {
                    date: row.get(0)?,
                    count: row.get(1)?,
                })
            })?;
            let mut points = Vec::new();
            for row in rows {
                points.push(row?);
            }
            Ok(points)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Category breakdown over all properties, count descending with category
/// name as the deterministic tiebreak. Null and empty categories group under
/// `Uncategorized`.
pub async fn properties_by_category(db: &Database) -> Result<Vec<CategoryCount>, RooflineError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT CASE WHEN category IS NULL OR category = ''
                             THEN 'Uncategorized' ELSE category END AS cat,
                        COUNT(*) AS count
                 FROM properties
                 GROUP BY cat
                 ORDER BY count DESC, cat ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?;
            let mut breakdown = Vec::new();
            for row in rows {
                breakdown.push(row?);
            }
            Ok(breakdown)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Users created on or after `since`, newest first, capped at `limit`,
/// redacted to the public snapshot.
pub async fn recent_users(
    db: &Database,
    since: &str,
    limit: i64,
) -> Result<Vec<PublicUser>, RooflineError> {
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, created_at
                 FROM users
                 WHERE strftime('%Y-%m-%d', created_at) >= ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![since, limit], |row| {
                Ok(PublicUser {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
