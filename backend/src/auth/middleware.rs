//! Request authorization filter
//!
//! Runs once per request in front of every route. Paths on the public
//! allow-list pass straight through; everything else must carry a valid
//! bearer token whose subject is still a registered account.
//!
//! # Performance
//!
//! Uses pre-computed JWT keys from AppState to avoid expensive
//! key derivation on every request.

use super::error::AuthError;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use expense_tracker_shared::Role;

/// Paths reachable without a token
pub const PUBLIC_PATHS: &[&str] = &[
    "/api/auth/register",
    "/api/auth/login",
    "/",
    "/index.html",
    "/styles.css",
    "/script.js",
    "/health",
    "/health/live",
    "/health/ready",
];

/// Identity attached to a request after its token was verified
///
/// Lives in the request extensions for the duration of the request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub subject: String,
    pub role: Role,
}

/// Whether `path` bypasses token checks
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

/// Verify a token and resolve the account it was issued to
pub async fn authenticate(
    state: &AppState,
    token: &str,
) -> Result<AuthenticatedPrincipal, AuthError> {
    let subject = state.tokens().verify(token)?;

    let credential = state
        .credentials()
        .find_by_username(&subject)
        .await
        .map_err(|e| AuthError::Unexpected(e.into()))?
        .ok_or_else(|| {
            tracing::debug!(subject = %subject, "Token subject no longer registered");
            AuthError::TokenInvalid
        })?;

    Ok(AuthenticatedPrincipal {
        subject: credential.username,
        role: credential.role,
    })
}

/// Middleware applied to the whole router
///
/// Public paths skip verification entirely. Any other request without a
/// valid bearer token is rejected with 401 before a handler runs.
pub async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers())
        .map(str::to_owned)
        .ok_or(AuthError::TokenInvalid)?;

    let principal = authenticate(&state, &token).await?;
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .ok_or_else(|| AuthError::TokenInvalid.into())
    }
}
