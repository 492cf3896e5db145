// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing taxonomy: the rental/sale pairing and title-based category rules.
//!
//! A listing's `type` ("rental"/"sale") and `listed_in` ("rentals"/"sales")
//! columns must never disagree. Both are derived from a single
//! [`ListingKind`] value, so a mismatched pair is unrepresentable.

use serde::{Deserialize, Serialize};

/// The fixed category taxonomy. Not enforced at the store layer; free text
/// may appear in old rows.
pub const CATEGORIES: [&str; 7] = [
    "Houses",
    "Apartments",
    "Condos",
    "Townhomes",
    "Offices",
    "Retails",
    "Land",
];

/// Ordered, case-insensitive substring rules mapping title keywords to a
/// category. Evaluated top to bottom; first hit wins.
const CATEGORY_RULES: [(&str, &str); 5] = [
    ("villa", "Houses"),
    ("house", "Houses"),
    ("condo", "Condos"),
    ("apartment", "Apartments"),
    ("office", "Offices"),
];

/// Fallback when no rule matches. Best-effort, not authoritative.
const CATEGORY_FALLBACK: &str = "Houses";

/// Whether a listing is offered for rent or for sale.
///
/// Single source for both the `type` and `listed_in` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Rental,
    Sale,
}

impl ListingKind {
    /// Normalize a client-supplied `listedIn` value. Absent or unrecognized
    /// input defaults to `Sale`.
    pub fn from_listed_in(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("rentals") => Self::Rental,
            _ => Self::Sale,
        }
    }

    /// Parse a stored `listed_in` column, tolerating legacy `type` spellings.
    pub fn from_stored(listed_in: Option<&str>, kind: Option<&str>) -> Self {
        match (listed_in, kind) {
            (Some("rentals"), _) | (_, Some("rental")) => Self::Rental,
            _ => Self::Sale,
        }
    }

    /// The `type` column value.
    pub fn kind_str(self) -> &'static str {
        match self {
            Self::Rental => "rental",
            Self::Sale => "sale",
        }
    }

    /// The `listed_in` column value.
    pub fn market_str(self) -> &'static str {
        match self {
            Self::Rental => "rentals",
            Self::Sale => "sales",
        }
    }
}

/// The `listedIn` wire label paired with a [`ListingKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketLabel {
    Rentals,
    Sales,
}

impl From<ListingKind> for MarketLabel {
    fn from(kind: ListingKind) -> Self {
        match kind {
            ListingKind::Rental => Self::Rentals,
            ListingKind::Sale => Self::Sales,
        }
    }
}

/// Derive a category from a listing title via the ordered rule list.
///
/// Falls back to `Houses` when nothing matches; callers treat the result as
/// best-effort.
pub fn derive_category(title: &str) -> &'static str {
    let lowered = title.to_lowercase();
    for (needle, category) in CATEGORY_RULES {
        if lowered.contains(needle) {
            return category;
        }
    }
    CATEGORY_FALLBACK
}

/// Derive a [`ListingKind`] from title keywords ("rent" vs "sale"/"sell").
///
/// Used by the backfill path for rows that predate the `listed_in` column.
/// Defaults to `Sale`.
pub fn derive_kind_from_title(title: &str) -> ListingKind {
    let lowered = title.to_lowercase();
    if lowered.contains("rent") {
        ListingKind::Rental
    } else {
        ListingKind::Sale
    }
}
