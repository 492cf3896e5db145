// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical domain types shared across the Roofline workspace.
//!
//! `User` is the full credential row and deliberately does not implement
//! `Serialize`; only the redacted [`PublicUser`] / [`UserProfile`] views go
//! over the wire. Property JSON is camelCase, statistics JSON snake_case,
//! matching the public API contract.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{ListingKind, MarketLabel};

/// Full user row, including the password hash. Internal use only.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string. Never plaintext, never serialized.
    pub password_hash: String,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// UTC ISO-8601 text.
    pub created_at: String,
}

impl User {
    /// Redact to the public snapshot returned by auth endpoints and stats.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at.clone(),
        }
    }

    /// Redact to the profile view returned by `/api/auth/me`.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at.clone(),
            phone: self.phone.clone(),
            address1: self.address1.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }
}

/// Redacted user snapshot: what registration, login, and stats expose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// Profile view including the optional contact columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Structured features sub-document. Flags are stored 0/1 as in the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFeatures {
    #[serde(default)]
    pub bedrooms: i64,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub garage: i64,
    #[serde(default)]
    pub elevator: i64,
    #[serde(default)]
    pub kitchen: i64,
}

/// Structured address sub-document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAddress {
    /// Free-form address line.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub street: String,
    /// Area / neighborhood.
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub state: String,
}

/// Owner display fields joined onto a property detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A fully hydrated property listing as exposed by the API.
///
/// `kind` and `market` are both derived from one [`ListingKind`] at the
/// single construction point, so the serialized `type`/`listedIn` pair can
/// never disagree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    /// Hero image path, empty string when the listing has no images.
    pub image_url: String,
    /// Ordered image references; the first element is the hero image.
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub features: PropertyFeatures,
    pub address: PropertyAddress,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    #[serde(rename = "listedIn")]
    pub market: MarketLabel,
    pub category: Option<String>,
    pub featured: bool,
    pub created_at: String,
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerInfo>,
}

/// One point of a gap-filled daily series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub count: i64,
}

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// User-side statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub total: i64,
    pub by_day: Vec<DailyCount>,
    pub last_30d_new: Vec<PublicUser>,
}

/// Property-side statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyStats {
    pub total: i64,
    pub by_day: Vec<DailyCount>,
    pub by_category: Vec<CategoryCount>,
}

/// The dashboard statistics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub users: UserStats,
    pub properties: PropertyStats,
    /// RFC 3339 instant the report was computed at; also the `as_of` anchor
    /// for all relative-date math inside the report.
    pub generated_at: String,
}
