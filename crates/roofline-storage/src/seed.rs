// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample listings for empty development databases.

use roofline_core::{ListingKind, PropertyAddress, PropertyFeatures, RooflineError};

use crate::database::Database;
use crate::models::NewProperty;
use crate::queries::{properties, stats};

/// Insert three sample listings when the properties table is empty.
///
/// Idempotent: a non-empty table is left untouched. Returns the number of
/// rows inserted.
pub async fn seed_sample_properties(db: &Database) -> Result<usize, RooflineError> {
    if stats::count_properties(db).await? > 0 {
        return Ok(0);
    }

    let samples = sample_listings();
    let inserted = samples.len();
    for sample in samples {
        properties::insert_property(db, &sample).await?;
    }
    tracing::info!(inserted, "seeded sample properties");
    Ok(inserted)
}

fn sample_listings() -> Vec<NewProperty> {
    let amman = PropertyAddress {
        address: "Abdoun".to_string(),
        street: "Zahran St".to_string(),
        area: "Amman".to_string(),
        city: "Amman".to_string(),
        county: "Amman".to_string(),
        state: String::new(),
    };

    vec![
        NewProperty {
            title: "Apartment for rent".to_string(),
            description: Some("Nice apartment with a great view.".to_string()),
            price: Some(350000.0),
            city: Some("Amman".to_string()),
            state: Some("Amman".to_string()),
            location: Some("Amman, Jordan".to_string()),
            image_url: Some("/images/houses/image2.jpg".to_string()),
            kind: ListingKind::Rental,
            category: Some("Apartments".to_string()),
            images: to_strings(&["image2.jpg", "8.jpg", "image7.jpg", "image8.jpg"]),
            amenities: to_strings(&[
                "Air Conditioning",
                "Security System",
                "Parking Space",
                "Gym Room",
                "Free WIFI",
                "Fire Place",
            ]),
            features: PropertyFeatures {
                bedrooms: 3,
                status: 1,
                garage: 1,
                elevator: 1,
                kitchen: 1,
            },
            address: amman.clone(),
            featured: true,
            user_id: None,
        },
        NewProperty {
            title: "Renovated House For Sale".to_string(),
            description: Some("Fully renovated, ready to move.".to_string()),
            price: Some(35000.0),
            city: Some("Amman".to_string()),
            state: Some("Amman".to_string()),
            location: Some("Amman, Jordan".to_string()),
            image_url: Some("/images/houses/image8.jpg".to_string()),
            kind: ListingKind::Sale,
            category: Some("Houses".to_string()),
            images: to_strings(&["image8.jpg", "image5.jpg", "image7.jpg", "image8.jpg"]),
            amenities: to_strings(&["Parking Space", "Gym Room", "Free WIFI", "Fire Place"]),
            features: PropertyFeatures {
                bedrooms: 3,
                status: 1,
                garage: 1,
                elevator: 0,
                kitchen: 1,
            },
            address: PropertyAddress {
                address: "Khalda".to_string(),
                street: "Wasfi Al Tal".to_string(),
                ..amman.clone()
            },
            featured: true,
            user_id: None,
        },
        NewProperty {
            title: "Offices for rent".to_string(),
            description: Some("Modern offices in a prime location.".to_string()),
            price: Some(35000.0),
            city: Some("Amman".to_string()),
            state: Some("Amman".to_string()),
            location: Some("Amman, Jordan".to_string()),
            image_url: Some("/images/houses/image2.jpg".to_string()),
            kind: ListingKind::Rental,
            category: Some("Offices".to_string()),
            images: to_strings(&["image2.jpg", "image8.jpg", "image7.jpg", "image8.jpg"]),
            amenities: to_strings(&["Air Conditioning", "Security System", "Parking Space"]),
            features: PropertyFeatures {
                bedrooms: 0,
                status: 1,
                garage: 1,
                elevator: 1,
                kitchen: 0,
            },
            address: PropertyAddress {
                address: "Shmeisani".to_string(),
                street: "Queen Noor St".to_string(),
                ..amman
            },
            featured: true,
            user_id: None,
        },
    ]
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
