// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Insert models for storage entities.
//!
//! The canonical read types live in `roofline-core::types`; this module adds
//! the write-side structs. Sub-documents stay typed here and are serialized
//! to JSON text only at the store boundary.

use roofline_core::{ListingKind, PropertyAddress, PropertyFeatures};

/// A user row about to be inserted. `password_hash` is the argon2id PHC
/// string, never plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// A property row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    /// Hero image path, `None` when the listing has no images.
    pub image_url: Option<String>,
    pub kind: ListingKind,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub features: PropertyFeatures,
    pub address: PropertyAddress,
    pub featured: bool,
    pub user_id: Option<i64>,
}
