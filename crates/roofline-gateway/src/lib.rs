// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Roofline listing platform, built on axum.
//!
//! Exposes the cookie-authenticated JSON API (auth, properties, dashboard
//! statistics), multipart image uploads, and static serving of uploaded
//! images. All domain logic lives in the storage and auth crates; handlers
//! translate HTTP in and out.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;
pub mod stats;
pub mod uploads;

pub use error::ApiError;
pub use server::{AppState, ServerConfig, build_router, start_server};
pub use uploads::UploadStore;
