// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. The session middleware
//! guards the protected route group; the create-listing route sits in the
//! public group for method merging and is guarded by its `ActingUser`
//! extractor instead.

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use roofline_auth::SessionKeys;
use roofline_core::RooflineError;
use roofline_storage::Database;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::stats;
use crate::uploads::UploadStore;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the single SQLite writer.
    pub db: Database,
    /// Session token signer/verifier.
    pub keys: SessionKeys,
    /// Image upload store.
    pub uploads: UploadStore,
}

/// Gateway server configuration (mirrors ServerConfig from roofline-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Browser origin allowed to make credentialed requests.
    pub client_origin: String,
}

/// Assemble the full application router.
pub fn build_router(state: AppState, client_origin: &str) -> Result<Router, RooflineError> {
    let origin: HeaderValue = client_origin
        .parse()
        .map_err(|_| RooflineError::Config(format!("invalid client origin: {client_origin}")))?;
    // Credentialed CORS: the cookie only flows for the configured origin.
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let public_routes = Router::new()
        .route("/api/health", get(handlers::get_health))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/signup", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/properties",
            get(handlers::properties::list).post(handlers::properties::create),
        )
        .route("/api/properties/{id}", get(handlers::properties::detail))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/properties/mine/list", get(handlers::properties::mine))
        .route("/api/stats", get(stats::stats_report))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::session_middleware,
        ))
        .with_state(state.clone());

    let static_routes = Router::new().nest_service(
        state.uploads.public_prefix(),
        ServeDir::new(state.uploads.dir()),
    );

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(static_routes)
        .layer(DefaultBodyLimit::max(state.uploads.request_body_limit()))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Start the gateway HTTP server and serve until shutdown.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), RooflineError> {
    let app = build_router(state, &config.client_origin)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RooflineError::Config(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("Roofline listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| RooflineError::Internal(format!("server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use roofline_core::ListingKind;
    use roofline_core::types::{PropertyAddress, PropertyFeatures};
    use roofline_storage::NewProperty;
    use roofline_storage::queries::properties as property_queries;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const BOUNDARY: &str = "roofline-test-boundary";

    async fn test_app() -> (Router, AppState, tempfile::TempDir) {
        let db = Database::open_in_memory().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadStore::new(dir.path(), 1024 * 1024, "/images/houses").unwrap();
        let state = AppState {
            db,
            keys: SessionKeys::new("test-secret", 7),
            uploads,
        };
        let app = build_router(state.clone(), "http://localhost:3000").unwrap();
        (app, state, dir)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    /// Register a user and return the session cookie pair plus the response
    /// body.
    async fn register(app: &Router, name: &str, email: &str) -> (String, Value) {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({ "name": name, "email": email, "password": "secret1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.contains("HttpOnly"), "got {set_cookie}");
        assert!(set_cookie.contains("SameSite=Lax"), "got {set_cookie}");
        let session = set_cookie.split(';').next().unwrap().to_string();
        let body = body_json(response).await;
        (session, body)
    }

    fn multipart_request(
        cookie: Option<&str>,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &str, &[u8])],
    ) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (field, filename, content_type, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                     filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/properties")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn sample_new_property(title: &str, featured: bool) -> NewProperty {
        NewProperty {
            title: title.to_string(),
            description: None,
            price: Some(500.0),
            city: Some("Amman".into()),
            state: Some("Amman".into()),
            location: Some("Amman, Amman".into()),
            image_url: None,
            kind: ListingKind::Rental,
            category: Some("Apartments".into()),
            images: Vec::new(),
            amenities: Vec::new(),
            features: PropertyFeatures::default(),
            address: PropertyAddress::default(),
            featured,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _state, _dir) = test_app().await;
        let response = app.oneshot(get_request("/api/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn register_sets_cookie_and_me_returns_profile() {
        let (app, _state, _dir) = test_app().await;
        let (session, body) = register(&app, "Alice", "alice@example.com").await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let response = app
            .oneshot(get_request("/api/auth/me", Some(&session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let me = body_json(response).await;
        assert_eq!(me["email"], "alice@example.com");
        assert_eq!(me["name"], "Alice");
        assert!(me.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn login_merges_unknown_email_and_wrong_password() {
        let (app, _state, _dir) = test_app().await;
        register(&app, "Alice", "alice@example.com").await;

        let wrong_password = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "email": "alice@example.com", "password": "nope" }),
            ))
            .await
            .unwrap();
        let unknown_email = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "email": "nobody@example.com", "password": "secret1" }),
            ))
            .await
            .unwrap();
        assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
        // Indistinguishable bodies.
        assert_eq!(
            body_json(wrong_password).await,
            body_json(unknown_email).await
        );
    }

    #[tokio::test]
    async fn login_succeeds_with_the_right_password() {
        let (app, _state, _dir) = test_app().await;
        let (_, registered) = register(&app, "Alice", "alice@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "email": "alice@example.com", "password": "secret1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["id"], registered["user"]["id"]);
    }

    #[tokio::test]
    async fn duplicate_email_registration_conflicts() {
        let (app, _state, _dir) = test_app().await;
        register(&app, "Alice", "alice@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({ "name": "Other", "email": "alice@example.com", "password": "x1y2z3" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn register_requires_all_fields() {
        let (app, _state, _dir) = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({ "name": "  ", "email": "a@x.com", "password": "secret1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_and_garbage_tokens() {
        let (app, _state, _dir) = test_app().await;
        for uri in ["/api/auth/me", "/api/properties/mine/list", "/api/stats"] {
            let missing = app.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert_eq!(missing.status(), StatusCode::UNAUTHORIZED, "{uri}");
            let garbage = app
                .clone()
                .oneshot(get_request(uri, Some("token=garbage")))
                .await
                .unwrap();
            assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
        let create = app
            .oneshot(multipart_request(None, &[("title", "Villa")], &[]))
            .await
            .unwrap();
        assert_eq!(create.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_listing_via_multipart() {
        let (app, _state, _dir) = test_app().await;
        let (session, registered) = register(&app, "Alice", "alice@example.com").await;

        let response = app
            .clone()
            .oneshot(multipart_request(
                Some(&session),
                &[
                    ("title", "Luxury Villa for sale"),
                    ("price", "1200.5"),
                    ("amenities", "Pool, Gym"),
                    ("features", r#"{"bedrooms":4,"garage":1}"#),
                    ("city", "Amman"),
                    ("state", "Amman"),
                    ("featured", "true"),
                ],
                &[("mainImage", "hero.png", "image/png", b"fakepng" as &[u8])],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let listing = body_json(response).await;

        // No listedIn field: defaults to a sale; category derived from title.
        assert_eq!(listing["type"], "sale");
        assert_eq!(listing["listedIn"], "sales");
        assert_eq!(listing["category"], "Houses");
        assert_eq!(listing["price"], 1200.5);
        assert_eq!(listing["amenities"], json!(["Pool", "Gym"]));
        assert_eq!(listing["features"]["bedrooms"], 4);
        assert_eq!(listing["features"]["elevator"], 0);
        assert_eq!(listing["location"], "Amman, Amman");
        assert_eq!(listing["featured"], true);
        assert_eq!(listing["userId"], registered["user"]["id"]);
        let image_url = listing["imageUrl"].as_str().unwrap();
        assert!(image_url.starts_with("/images/houses/"), "got {image_url}");
        assert_eq!(listing["images"].as_array().unwrap().len(), 1);

        // Visible in the public list, in the detail view with owner, and in
        // the creator's own list.
        let list = body_json(
            app.clone()
                .oneshot(get_request("/api/properties", None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let id = listing["id"].as_i64().unwrap();
        let detail_response = app
            .clone()
            .oneshot(get_request(&format!("/api/properties/{id}"), None))
            .await
            .unwrap();
        assert_eq!(detail_response.status(), StatusCode::OK);
        let detail = body_json(detail_response).await;
        assert_eq!(detail["owner"]["name"], "Alice");

        let mine = body_json(
            app.oneshot(get_request("/api/properties/mine/list", Some(&session)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(mine.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_without_title_is_rejected_and_stores_no_files() {
        let (app, _state, dir) = test_app().await;
        let (session, _) = register(&app, "Alice", "alice@example.com").await;
        let response = app
            .oneshot(multipart_request(
                Some(&session),
                &[("title", "   "), ("price", "100")],
                &[("mainImage", "hero.png", "image/png", b"fakepng" as &[u8])],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        // The upload arrived before the title failed validation; it must not
        // have been written to disk.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn create_rejects_non_image_uploads() {
        let (app, _state, dir) = test_app().await;
        let (session, _) = register(&app, "Alice", "alice@example.com").await;
        let response = app
            .oneshot(multipart_request(
                Some(&session),
                &[("title", "Villa")],
                &[("mainImage", "evil.html", "text/html", b"<script>" as &[u8])],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn repeated_main_images_count_against_the_gallery_cap() {
        let (app, _state, dir) = test_app().await;
        let (session, _) = register(&app, "Alice", "alice@example.com").await;
        // One hero plus 21 extras: one over the 20-image gallery cap.
        let files: Vec<(&str, &str, &str, &[u8])> = (0..22)
            .map(|_| ("mainImage", "hero.png", "image/png", b"fakepng" as &[u8]))
            .collect();
        let response = app
            .oneshot(multipart_request(Some(&session), &[("title", "Villa")], &files))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn detail_rejects_non_numeric_ids_and_404s_missing_rows() {
        let (app, _state, _dir) = test_app().await;
        let non_numeric = app
            .clone()
            .oneshot(get_request("/api/properties/abc", None))
            .await
            .unwrap();
        assert_eq!(non_numeric.status(), StatusCode::BAD_REQUEST);

        let missing = app
            .oneshot(get_request("/api/properties/999", None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_paginates_and_filters_featured() {
        let (app, state, _dir) = test_app().await;
        for n in 1..=5 {
            property_queries::insert_property(
                &state.db,
                &sample_new_property(&format!("Listing {n}"), n % 2 == 0),
            )
            .await
            .unwrap();
        }

        let page = body_json(
            app.clone()
                .oneshot(get_request("/api/properties?limit=2&page=2", None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(page.as_array().unwrap().len(), 2);

        // Out-of-range page values floor to the first page.
        let zero = body_json(
            app.clone()
                .oneshot(get_request("/api/properties?page=0&limit=3", None))
                .await
                .unwrap(),
        )
        .await;
        let one = body_json(
            app.clone()
                .oneshot(get_request("/api/properties?page=1&limit=3", None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(zero, one);

        let featured = body_json(
            app.oneshot(get_request("/api/properties?featured=true", None))
                .await
                .unwrap(),
        )
        .await;
        let featured = featured.as_array().unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|p| p["featured"] == true));
    }

    #[tokio::test]
    async fn absurd_page_numbers_yield_an_empty_page() {
        let (app, state, _dir) = test_app().await;
        property_queries::insert_property(&state.db, &sample_new_property("Only one", false))
            .await
            .unwrap();

        // i64::MAX page: the offset saturates instead of overflowing.
        let uri = format!("/api/properties?page={}&limit=2", i64::MAX);
        let response = app.oneshot(get_request(&uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn stats_report_counts_users_and_properties() {
        let (app, state, _dir) = test_app().await;
        let (session, _) = register(&app, "Alice", "alice@example.com").await;
        property_queries::insert_property(&state.db, &sample_new_property("Flat", false))
            .await
            .unwrap();

        let response = app
            .oneshot(get_request("/api/stats", Some(&session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["users"]["total"], 1);
        assert_eq!(report["properties"]["total"], 1);
        assert_eq!(report["users"]["by_day"].as_array().unwrap().len(), 30);
        assert_eq!(report["properties"]["by_day"].as_array().unwrap().len(), 30);
        assert_eq!(
            report["properties"]["by_category"],
            json!([{ "category": "Apartments", "count": 1 }])
        );
        assert_eq!(
            report["users"]["last_30d_new"][0]["email"],
            "alice@example.com"
        );
        assert!(report["generated_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn logout_clears_the_session_cookie() {
        let (app, _state, _dir) = test_app().await;
        let response = app
            .oneshot(json_request("POST", "/api/auth/logout", None, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("token="), "got {set_cookie}");
        assert!(set_cookie.contains("Max-Age=0"), "got {set_cookie}");
    }

    #[tokio::test]
    async fn invalid_client_origin_fails_router_construction() {
        let (_, state, _dir) = test_app().await;
        assert!(build_router(state, "not a\nvalid origin").is_err());
    }
}
