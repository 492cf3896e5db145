// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backfill of denormalized columns for rows that predate them.
//!
//! Older property rows may be missing location, taxonomy, or sub-document
//! columns. This pass derives the missing values deterministically: kind and
//! category from title keywords, location from the scalar city/state, and a
//! guaranteed non-empty amenity set. Columns that already hold a value are
//! left untouched.

use roofline_core::{ListingKind, RooflineError, derive_category, derive_kind_from_title};
use rusqlite::params;

use crate::database::Database;

/// Amenity used when a row has none; the backfill path guarantees at least
/// one entry.
const DEFAULT_AMENITY: &str = "Parking Space";

/// Fill missing denormalized columns for every property row.
///
/// Returns the number of rows updated.
pub async fn backfill_properties(db: &Database) -> Result<usize, RooflineError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, city, state, location, type, listed_in, category,
                        images_json, amenities_json, features_json, address_json
                 FROM properties ORDER BY id ASC",
            )?;
            let rows: Vec<RawRow> = stmt
                .query_map([], |row| {
                    Ok(RawRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        city: row.get(2)?,
                        state: row.get(3)?,
                        location: row.get(4)?,
                        kind: row.get(5)?,
                        listed_in: row.get(6)?,
                        category: row.get(7)?,
                        images_json: row.get(8)?,
                        amenities_json: row.get(9)?,
                        features_json: row.get(10)?,
                        address_json: row.get(11)?,
                    })
                })?
                .collect::<Result<_, _>>()?;

            let mut update = conn.prepare(
                "UPDATE properties
                    SET location = ?1, type = ?2, listed_in = ?3, category = ?4,
                        images_json = ?5, amenities_json = ?6,
                        features_json = ?7, address_json = ?8
                  WHERE id = ?9",
            )?;

            let mut updated = 0usize;
            for row in rows {
                let Some(patch) = row.patch() else { continue };
                update.execute(params![
                    patch.location,
                    patch.kind.kind_str(),
                    patch.kind.market_str(),
                    patch.category,
                    patch.images_json,
                    patch.amenities_json,
                    patch.features_json,
                    patch.address_json,
                    row.id,
                ])?;
                updated += 1;
            }
            Ok(updated)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

struct RawRow {
    id: i64,
    title: String,
    city: Option<String>,
    state: Option<String>,
    location: Option<String>,
    kind: Option<String>,
    listed_in: Option<String>,
    category: Option<String>,
    images_json: Option<String>,
    amenities_json: Option<String>,
    features_json: Option<String>,
    address_json: Option<String>,
}

struct Patch {
    location: String,
    kind: ListingKind,
    category: String,
    images_json: String,
    amenities_json: String,
    features_json: String,
    address_json: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn is_empty_list(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None | Some("") | Some("[]") => true,
        _ => false,
    }
}

impl RawRow {
    /// Compute the filled row, or `None` when nothing is missing.
    fn patch(&self) -> Option<Patch> {
        // Location only counts as fillable when a scalar city or state
        // exists to derive it from.
        let location_fillable = is_blank(&self.location)
            && !(is_blank(&self.city) && is_blank(&self.state));
        let needs_fill = location_fillable
            || is_blank(&self.kind)
            || is_blank(&self.listed_in)
            || is_blank(&self.category)
            || is_blank(&self.images_json)
            || is_empty_list(&self.amenities_json)
            || is_blank(&self.features_json)
            || is_blank(&self.address_json);
        if !needs_fill {
            return None;
        }

        let kind = match self.listed_in.as_deref() {
            Some("rentals") => ListingKind::Rental,
            Some("sales") => ListingKind::Sale,
            _ => derive_kind_from_title(&self.title),
        };

        let location = self.location.clone().filter(|l| !l.trim().is_empty()).unwrap_or_else(|| {
            let parts: Vec<&str> = [self.city.as_deref(), self.state.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.trim().is_empty())
                .collect();
            parts.join(", ")
        });

        let category = self
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| derive_category(&self.title).to_string());

        let amenities_json = if is_empty_list(&self.amenities_json) {
            format!("[\"{DEFAULT_AMENITY}\"]")
        } else {
            self.amenities_json.clone().unwrap_or_default()
        };

        // An explicit empty list is a valid state; only absent values are
        // normalized, so a second pass sees nothing left to fill.
        let images_json = if is_blank(&self.images_json) {
            "[]".to_string()
        } else {
            self.images_json.clone().unwrap_or_default()
        };

        Some(Patch {
            location,
            kind,
            category,
            images_json,
            amenities_json,
            features_json: self.features_json.clone().unwrap_or_else(|| "{}".to_string()),
            address_json: self.address_json.clone().unwrap_or_else(|| "{}".to_string()),
        })
    }
}
