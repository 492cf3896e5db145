// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cookie session authentication for the gateway.
//!
//! The session token travels in an HTTP-only `token` cookie. Protected
//! route groups run [`session_middleware`] (fail-closed before the handler);
//! individual handlers take the [`ActingUser`] extractor, which reuses the
//! middleware's verification result when present and verifies the cookie
//! itself otherwise.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use roofline_auth::SessionKeys;
use roofline_core::RooflineError;

use crate::error::ApiError;
use crate::server::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// The authenticated caller, as proven by a valid session cookie.
///
/// This is the authoritative identity for every protected operation; any
/// owner id supplied in a request body is ignored.
#[derive(Debug, Clone)]
pub struct ActingUser {
    pub id: i64,
    pub email: String,
}

/// Middleware guarding a route group: verify the session cookie and stash
/// the caller identity as a request extension, or reject with 401.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let acting = verify_cookie(&state.keys, &jar)?;
    request.extensions_mut().insert(acting);
    Ok(next.run(request).await)
}

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        if let Some(acting) = parts.extensions.get::<ActingUser>() {
            return Ok(acting.clone());
        }
        let jar = CookieJar::from_headers(&parts.headers);
        verify_cookie(&state.keys, &jar)
    }
}

fn verify_cookie(keys: &SessionKeys, jar: &CookieJar) -> Result<ActingUser, ApiError> {
    let cookie = jar.get(SESSION_COOKIE).ok_or_else(|| {
        tracing::debug!("request rejected: no session cookie");
        RooflineError::Unauthenticated
    })?;
    let claims = keys.verify(cookie.value())?;
    Ok(ActingUser {
        id: claims.id,
        email: claims.email,
    })
}

/// Build the session cookie set on successful registration or login.
pub fn session_cookie(token: String, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(ttl_seconds))
        .build()
}

/// Build the removal cookie set on logout: empty value, `Max-Age=0`, same
/// attributes as the session cookie so browsers match and drop it. Added
/// unconditionally, so logout answers with a removal even when the request
/// carried no cookie.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
