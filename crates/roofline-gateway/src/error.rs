// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP mapping of domain errors.
//!
//! Handlers return `Result<_, ApiError>`; the single [`IntoResponse`] impl
//! below owns the status mapping and guarantees internal detail (SQL text,
//! I/O paths) is logged, never serialized into a response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roofline_core::RooflineError;
use serde::Serialize;

/// Wrapper carrying a domain error across the handler boundary.
#[derive(Debug)]
pub struct ApiError(RooflineError);

impl From<RooflineError> for ApiError {
    fn from(err: RooflineError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RooflineError::Validation(_) | RooflineError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            RooflineError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            RooflineError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            RooflineError::EmailInUse => (StatusCode::CONFLICT, self.0.to_string()),
            RooflineError::Storage { source } => {
                tracing::error!(error = %source, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            RooflineError::Config(detail) | RooflineError::Internal(detail) => {
                tracing::error!(detail, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: RooflineError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn status_mapping_is_stable() {
        assert_eq!(
            status_of(RooflineError::validation("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RooflineError::InvalidCredentials),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RooflineError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(RooflineError::NotFound("property".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(RooflineError::EmailInUse), StatusCode::CONFLICT);
        assert_eq!(
            status_of(RooflineError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_detail_never_reaches_the_body() {
        let response =
            ApiError::from(RooflineError::Internal("secret detail".into())).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8_lossy(&bytes).into_owned();
        assert!(!body.contains("secret detail"));
        assert!(body.contains("internal server error"));
    }
}
