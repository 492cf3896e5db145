// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the gateway routes.

pub mod auth;
pub mod properties;

use axum::Json;
use serde_json::{Value, json};

/// `GET /api/health` -- unauthenticated liveness probe.
pub async fn get_health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
