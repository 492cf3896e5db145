// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard statistics report.
//!
//! All relative-date math in one report anchors on a single `as_of` instant
//! captured at the start, so the per-day windows, the recent-user window,
//! and `generated_at` can never straddle a midnight boundary within one
//! request.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use roofline_core::types::{DailyCount, PropertyStats, StatsReport, UserStats};
use roofline_core::RooflineError;
use roofline_storage::Database;
use roofline_storage::queries::stats as stats_queries;

use crate::auth::ActingUser;
use crate::error::ApiError;
use crate::server::AppState;

/// Days covered by each gap-filled series, current day included.
pub const SERIES_DAYS: usize = 30;

/// Cap on users returned in the recent-signups list.
const RECENT_USERS_LIMIT: i64 = 50;

/// Expand sparse per-day counts into a dense ascending series of `days`
/// points ending at `end`. Days with no activity appear with a zero count.
pub fn fill_series(sparse: &[DailyCount], end: NaiveDate, days: usize) -> Vec<DailyCount> {
    let counts: std::collections::HashMap<&str, i64> = sparse
        .iter()
        .map(|point| (point.date.as_str(), point.count))
        .collect();
    (0..days)
        .rev()
        .map(|back| {
            let date = (end - Duration::days(back as i64))
                .format("%Y-%m-%d")
                .to_string();
            let count = counts.get(date.as_str()).copied().unwrap_or(0);
            DailyCount { date, count }
        })
        .collect()
}

/// Compute the full statistics report anchored at `as_of`.
pub async fn build_report(
    db: &Database,
    as_of: DateTime<Utc>,
) -> Result<StatsReport, RooflineError> {
    let end = as_of.date_naive();
    let since = (end - Duration::days(SERIES_DAYS as i64 - 1))
        .format("%Y-%m-%d")
        .to_string();

    let users_total = stats_queries::count_users(db).await?;
    let users_sparse = stats_queries::users_per_day(db, &since).await?;
    let recent = stats_queries::recent_users(db, &since, RECENT_USERS_LIMIT).await?;

    let properties_total = stats_queries::count_properties(db).await?;
    let properties_sparse = stats_queries::properties_per_day(db, &since).await?;
    let by_category = stats_queries::properties_by_category(db).await?;

    Ok(StatsReport {
        users: UserStats {
            total: users_total,
            by_day: fill_series(&users_sparse, end, SERIES_DAYS),
            last_30d_new: recent,
        },
        properties: PropertyStats {
            total: properties_total,
            by_day: fill_series(&properties_sparse, end, SERIES_DAYS),
            by_category,
        },
        generated_at: as_of.to_rfc3339(),
    })
}

/// `GET /api/stats`
pub async fn stats_report(
    State(state): State<AppState>,
    _acting: ActingUser,
) -> Result<Json<StatsReport>, ApiError> {
    let report = build_report(&state.db, Utc::now()).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn point(date: &str, count: i64) -> DailyCount {
        DailyCount {
            date: date.to_string(),
            count,
        }
    }

    #[test]
    fn empty_input_yields_thirty_zero_days() {
        let series = fill_series(&[], day("2026-08-25"), SERIES_DAYS);
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|p| p.count == 0));
        assert_eq!(series[0].date, "2026-07-27");
        assert_eq!(series[29].date, "2026-08-25");
    }

    #[test]
    fn sparse_counts_land_on_their_days() {
        let sparse = vec![point("2026-08-25", 3), point("2026-08-01", 1)];
        let series = fill_series(&sparse, day("2026-08-25"), SERIES_DAYS);
        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap(), &point("2026-08-25", 3));
        let aug1 = series.iter().find(|p| p.date == "2026-08-01").unwrap();
        assert_eq!(aug1.count, 1);
        assert_eq!(series.iter().map(|p| p.count).sum::<i64>(), 4);
    }

    #[test]
    fn counts_outside_the_window_are_dropped() {
        let sparse = vec![point("2026-07-26", 9), point("2026-08-26", 9)];
        let series = fill_series(&sparse, day("2026-08-25"), SERIES_DAYS);
        assert!(series.iter().all(|p| p.count == 0));
    }

    #[test]
    fn window_spans_month_and_year_boundaries() {
        let series = fill_series(&[], day("2026-01-15"), SERIES_DAYS);
        assert_eq!(series[0].date, "2025-12-17");
        assert_eq!(series[29].date, "2026-01-15");
        // Strictly ascending by date.
        for pair in series.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[tokio::test]
    async fn report_is_idempotent_for_a_fixed_anchor() {
        let db = Database::open_in_memory().await.unwrap();
        let as_of = "2026-08-25T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let first = build_report(&db, as_of).await.unwrap();
        let second = build_report(&db, as_of).await.unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn report_on_an_empty_database_is_well_formed() {
        let db = Database::open_in_memory().await.unwrap();
        let as_of = "2026-08-25T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let report = build_report(&db, as_of).await.unwrap();
        assert_eq!(report.users.total, 0);
        assert_eq!(report.users.by_day.len(), 30);
        assert_eq!(report.properties.by_day.len(), 30);
        assert!(report.properties.by_category.is_empty());
        assert!(report.users.last_30d_new.is_empty());
        assert_eq!(report.generated_at, as_of.to_rfc3339());
    }
}
