// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property CRUD operations.
//!
//! Rows carry denormalized JSON sub-documents (`images_json` etc.); decoding
//! happens exactly once here with tolerant defaults, and the `type` /
//! `listed_in` pair is rebuilt from a single [`ListingKind`] so the two can
//! never disagree in a hydrated [`Property`].

use roofline_core::decode::decode_or_default;
use roofline_core::{ListingKind, OwnerInfo, Property, RooflineError};
use rusqlite::params;

use crate::database::Database;
use crate::models::NewProperty;

const PROPERTY_COLUMNS: &str = "p.id, p.title, p.description, p.price, p.city, p.state, \
     p.location, p.image_url, p.type, p.listed_in, p.category, p.images_json, \
     p.amenities_json, p.features_json, p.address_json, p.featured, p.user_id, p.created_at";

/// Build a [`Property`] from a row selected with [`PROPERTY_COLUMNS`],
/// optionally followed by `owner_id, owner_name, owner_email` join columns.
fn property_from_row(row: &rusqlite::Row<'_>, with_owner: bool) -> Result<Property, rusqlite::Error> {
    let listed_in: Option<String> = row.get(9)?;
    let kind_col: Option<String> = row.get(8)?;
    let kind = ListingKind::from_stored(listed_in.as_deref(), kind_col.as_deref());

    let images_json: Option<String> = row.get(11)?;
    let amenities_json: Option<String> = row.get(12)?;
    let features_json: Option<String> = row.get(13)?;
    let address_json: Option<String> = row.get(14)?;

    let owner = if with_owner {
        let owner_id: Option<i64> = row.get(18)?;
        owner_id.map(|id| {
            Ok::<_, rusqlite::Error>(OwnerInfo {
                id,
                name: row.get(19)?,
                email: row.get(20)?,
            })
        })
        .transpose()?
    } else {
        None
    };

    Ok(Property {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        location: row.get(6)?,
        image_url: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        images: decode_or_default(images_json.as_deref()),
        amenities: decode_or_default(amenities_json.as_deref()),
        features: decode_or_default(features_json.as_deref()),
        address: decode_or_default(address_json.as_deref()),
        kind,
        market: kind.into(),
        category: row.get(10)?,
        featured: row.get::<_, i64>(15)? != 0,
        user_id: row.get(16)?,
        created_at: row.get(17)?,
        owner,
    })
}

/// Insert a property and return its id. Sub-documents are serialized to
/// JSON text here, at the store boundary.
pub async fn insert_property(db: &Database, property: &NewProperty) -> Result<i64, RooflineError> {
    let p = property.clone();
    db.connection()
        .call(move |conn| {
            let images = serde_json::to_string(&p.images).map_err(json_to_sql_err)?;
            let amenities = serde_json::to_string(&p.amenities).map_err(json_to_sql_err)?;
            let features = serde_json::to_string(&p.features).map_err(json_to_sql_err)?;
            let address = serde_json::to_string(&p.address).map_err(json_to_sql_err)?;

            conn.execute(
                "INSERT INTO properties
                   (title, description, price, city, state, location, image_url,
                    type, listed_in, category, images_json, amenities_json,
                    features_json, address_json, featured, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    p.title,
                    p.description,
                    p.price,
                    p.city,
                    p.state,
                    p.location,
                    p.image_url,
                    p.kind.kind_str(),
                    p.kind.market_str(),
                    p.category,
                    images,
                    amenities,
                    features,
                    address,
                    p.featured as i64,
                    p.user_id,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Carry a serialization failure across the connection thread as a rusqlite
/// bind-conversion error.
fn json_to_sql_err(e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(e))
}

/// Get a single property by id, joining owner display fields when an owner
/// exists. Absent rows map to [`RooflineError::NotFound`].
pub async fn get_property(db: &Database, id: i64) -> Result<Property, RooflineError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROPERTY_COLUMNS}, u.id, u.name, u.email
                 FROM properties p
                 LEFT JOIN users u ON u.id = p.user_id
                 WHERE p.id = ?1"
            ))?;
            let result = stmt.query_row(params![id], |row| property_from_row(row, true));
            match result {
                Ok(property) => Ok(Some(property)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?
        .ok_or_else(|| RooflineError::NotFound("property".to_string()))
}

/// List properties, newest first, with an optional featured-only filter and
/// offset pagination. Ordering ties on `created_at` break by id so the page
/// sequence is fully deterministic.
pub async fn list_properties(
    db: &Database,
    featured_only: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Property>, RooflineError> {
    db.connection()
        .call(move |conn| {
            let where_sql = if featured_only { "WHERE p.featured = 1" } else { "" };
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROPERTY_COLUMNS}
                 FROM properties p
                 {where_sql}
                 ORDER BY p.created_at DESC, p.id DESC
                 LIMIT ?1 OFFSET ?2"
            ))?;
            let rows = stmt.query_map(params![limit, offset], |row| {
                property_from_row(row, false)
            })?;
            let mut properties = Vec::new();
            for row in rows {
                properties.push(row?);
            }
            Ok(properties)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all properties owned by `user_id`, newest first, with owner fields
/// joined.
pub async fn list_properties_by_owner(
    db: &Database,
    user_id: i64,
) -> Result<Vec<Property>, RooflineError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROPERTY_COLUMNS}, u.id, u.name, u.email
                 FROM properties p
                 LEFT JOIN users u ON u.id = p.user_id
                 WHERE p.user_id = ?1
                 ORDER BY p.created_at DESC, p.id DESC"
            ))?;
            let rows = stmt.query_map(params![user_id], |row| property_from_row(row, true))?;
            let mut properties = Vec::new();
            for row in rows {
                properties.push(row?);
            }
            Ok(properties)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
