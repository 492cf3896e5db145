// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing handlers: browse, detail, create (multipart), and my-listings.
//!
//! Creation is tolerant of sloppy clients everywhere except the title:
//! malformed JSON sub-documents fall back to defaults, unparseable numbers
//! drop to null, and an omitted category is derived from title keywords.
//! Image rejections and the gallery cap are hard errors.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use roofline_core::decode::{decode_or_default, parse_amenities, parse_flag};
use roofline_core::types::{Property, PropertyAddress, PropertyFeatures};
use roofline_core::{ListingKind, RooflineError, derive_category};
use roofline_storage::NewProperty;
use roofline_storage::queries::properties;
use serde::Deserialize;

use crate::auth::ActingUser;
use crate::error::ApiError;
use crate::server::AppState;
use crate::uploads::MAX_GALLERY_IMAGES;

/// Page size when the client sends none (or nonsense).
const DEFAULT_PAGE_SIZE: i64 = 12;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub featured: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `GET /api/properties`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let featured_only = query.featured.as_deref() == Some("true");
    let limit = positive_or(query.limit.as_deref(), DEFAULT_PAGE_SIZE);
    let page = positive_or(query.page.as_deref(), 1);
    // Saturate: an absurd page number yields an empty page, not an overflow.
    let offset = page.saturating_sub(1).saturating_mul(limit);

    let listings = properties::list_properties(&state.db, featured_only, limit, offset).await?;
    Ok(Json(listings))
}

/// `GET /api/properties/{id}`
pub async fn detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| RooflineError::validation("property id must be a number"))?;
    let property = properties::get_property(&state.db, id).await?;
    Ok(Json(property))
}

/// `GET /api/properties/mine/list`
pub async fn mine(
    State(state): State<AppState>,
    acting: ActingUser,
) -> Result<Json<Vec<Property>>, ApiError> {
    let listings = properties::list_properties_by_owner(&state.db, acting.id).await?;
    Ok(Json(listings))
}

/// An uploaded file buffered until the whole request has validated.
struct PendingUpload {
    filename: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// `POST /api/properties` -- multipart form with text fields plus an
/// optional `mainImage` file and up to twenty `gallery` files.
///
/// Files are buffered and vetted as they arrive but only written to disk
/// after the request as a whole validates, so a rejected request never
/// leaves orphan files behind.
pub async fn create(
    State(state): State<AppState>,
    acting: ActingUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut main_image: Option<PendingUpload> = None;
    let mut gallery: Vec<PendingUpload> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "mainImage" => {
                let upload = buffer_upload(&state, field).await?;
                // First hero image wins; extras count against the gallery
                // cap like any other gallery file.
                if main_image.is_none() {
                    main_image = Some(upload);
                } else {
                    push_gallery(&mut gallery, upload)?;
                }
            }
            "gallery" => {
                let upload = buffer_upload(&state, field).await?;
                push_gallery(&mut gallery, upload)?;
            }
            _ => {
                let value = field.text().await.map_err(bad_multipart)?;
                fields.insert(name, value);
            }
        }
    }

    let title = fields.get("title").map(|s| s.trim()).unwrap_or_default();
    if title.is_empty() {
        return Err(RooflineError::validation("title is required").into());
    }

    let mut main_image_name: Option<String> = None;
    let mut gallery_names: Vec<String> = Vec::new();
    if let Some(upload) = main_image {
        main_image_name = Some(persist_upload(&state, upload).await?);
    }
    for upload in gallery {
        gallery_names.push(persist_upload(&state, upload).await?);
    }

    let kind = ListingKind::from_listed_in(fields.get("listedIn").map(String::as_str));
    let category = match fields.get("category").map(|s| s.trim()) {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => derive_category(title).to_string(),
    };

    let features: PropertyFeatures = decode_or_default(fields.get("features").map(String::as_str));
    let address: PropertyAddress = decode_or_default(fields.get("address").map(String::as_str));
    let amenities = parse_amenities(fields.get("amenities").map(String::as_str));
    let featured = parse_flag(fields.get("featured").map(String::as_str));
    let price = fields.get("price").and_then(|p| p.trim().parse().ok());
    let city = non_empty(fields.get("city"));
    let state_field = non_empty(fields.get("state"));
    let location = derive_location(&address, city.as_deref(), state_field.as_deref());

    let images: Vec<String> = main_image_name
        .into_iter()
        .chain(gallery_names)
        .map(|stored| state.uploads.public_url(&stored))
        .collect();
    let image_url = images.first().cloned();

    let new_property = NewProperty {
        title: title.to_string(),
        description: non_empty(fields.get("description")),
        price,
        city,
        state: state_field,
        location,
        image_url,
        kind,
        category: Some(category),
        images,
        amenities,
        features,
        address,
        featured,
        user_id: Some(acting.id),
    };

    let id = properties::insert_property(&state.db, &new_property).await?;
    let property = properties::get_property(&state.db, id).await?;
    tracing::info!(property_id = id, user_id = acting.id, "listing created");
    Ok((StatusCode::CREATED, Json(property)))
}

/// Display location: the structured address wins when it carries both city
/// and state, otherwise whatever scalar pieces exist are joined.
fn derive_location(
    address: &PropertyAddress,
    city: Option<&str>,
    state: Option<&str>,
) -> Option<String> {
    let addr_city = address.city.trim();
    let addr_state = address.state.trim();
    if !addr_city.is_empty() && !addr_state.is_empty() {
        return Some(format!("{addr_city}, {addr_state}"));
    }
    let joined: Vec<&str> = [city, state].into_iter().flatten().collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join(", "))
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// Read one file part into memory, rejecting bad content types and oversize
/// files before anything is buffered further.
async fn buffer_upload(
    state: &AppState,
    field: axum::extract::multipart::Field<'_>,
) -> Result<PendingUpload, ApiError> {
    let filename = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(bad_multipart)?;
    state
        .uploads
        .check(content_type.as_deref(), bytes.len() as u64)?;
    Ok(PendingUpload {
        filename,
        content_type,
        bytes,
    })
}

fn push_gallery(gallery: &mut Vec<PendingUpload>, upload: PendingUpload) -> Result<(), ApiError> {
    if gallery.len() >= MAX_GALLERY_IMAGES {
        return Err(RooflineError::validation(format!(
            "at most {MAX_GALLERY_IMAGES} gallery images are accepted"
        ))
        .into());
    }
    gallery.push(upload);
    Ok(())
}

async fn persist_upload(state: &AppState, upload: PendingUpload) -> Result<String, ApiError> {
    let stored = state
        .uploads
        .save(
            upload.filename.as_deref(),
            upload.content_type.as_deref(),
            &upload.bytes,
        )
        .await?;
    Ok(stored)
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> RooflineError {
    RooflineError::validation(format!("malformed upload: {err}"))
}
