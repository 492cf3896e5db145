// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account and session handlers.
//!
//! Registration and login both end in the same place: an argon2id-verified
//! identity, a signed session token returned in the body, and the same token
//! set as an HTTP-only cookie. Login failures collapse user-not-found and
//! wrong-password into one indistinguishable response.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use roofline_auth::{hash_password, verify_password};
use roofline_core::types::{PublicUser, UserProfile};
use roofline_core::RooflineError;
use roofline_storage::NewUser;
use roofline_storage::queries::users;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::auth::{ActingUser, expired_session_cookie, session_cookie};
use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned by registration and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    /// The session token, also set as the `token` cookie.
    pub token: String,
    pub user: PublicUser,
}

/// `POST /api/auth/register` (also mounted at `/api/auth/signup`)
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let name = body.name.trim().to_string();
    let email = body.email.trim().to_string();
    if name.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(RooflineError::validation("name, email and password are required").into());
    }

    // Argon2 is deliberately slow; keep it off the async worker threads.
    let password = body.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| RooflineError::Internal(format!("hashing task failed: {e}")))??;

    let id = users::insert_user(
        &state.db,
        &NewUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;
    let user = users::get_user_by_id(&state.db, id)
        .await?
        .ok_or_else(|| RooflineError::Internal("user row missing after insert".into()))?;

    tracing::info!(user_id = id, "user registered");
    issue_session(&state, jar, &user.public(), "registered")
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(RooflineError::validation("email and password are required").into());
    }

    let Some(user) = users::get_user_by_email(&state.db, email).await? else {
        tracing::debug!("login rejected: unknown email");
        return Err(RooflineError::InvalidCredentials.into());
    };

    let password = body.password;
    let stored = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| RooflineError::Internal(format!("verification task failed: {e}")))?;
    if !verified {
        tracing::debug!(user_id = user.id, "login rejected: wrong password");
        return Err(RooflineError::InvalidCredentials.into());
    }

    tracing::info!(user_id = user.id, "user logged in");
    issue_session(&state, jar, &user.public(), "logged in")
}

/// `POST /api/auth/logout`
///
/// Clears the cookie only; the token itself stays valid until expiry.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    // `add` emits the removal cookie even when the request carried none;
    // `remove` would only answer requests that already had a session.
    let jar = jar.add(expired_session_cookie());
    (jar, Json(json!({ "success": true, "message": "logged out" })))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    acting: ActingUser,
) -> Result<Json<UserProfile>, ApiError> {
    // The account may have been deleted since the token was issued.
    let user = users::get_user_by_id(&state.db, acting.id)
        .await?
        .ok_or(RooflineError::Unauthenticated)?;
    Ok(Json(user.profile()))
}

fn issue_session(
    state: &AppState,
    jar: CookieJar,
    user: &PublicUser,
    message: &str,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let token = state.keys.issue(user.id, &user.email)?;
    let jar = jar.add(session_cookie(token.clone(), state.keys.ttl_seconds()));
    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            message: message.to_string(),
            token,
            user: user.clone(),
        }),
    ))
}
