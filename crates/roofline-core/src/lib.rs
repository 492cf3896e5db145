// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Roofline listing platform.
//!
//! This crate provides the error taxonomy, canonical domain types, the
//! listing taxonomy (type/market pairing and title-based category
//! derivation), and tolerant decoding for the denormalized JSON
//! sub-documents stored alongside relational columns.

pub mod decode;
pub mod error;
pub mod taxonomy;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RooflineError;
pub use taxonomy::{
    CATEGORIES, ListingKind, MarketLabel, derive_category, derive_kind_from_title,
};
pub use types::{
    CategoryCount, DailyCount, OwnerInfo, Property, PropertyAddress, PropertyFeatures,
    PropertyStats, PublicUser, StatsReport, User, UserProfile, UserStats,
};
