//! Authentication routes
//!
//! Provides endpoints for user registration, login, and the current
//! principal.
//!
//! # Performance Optimizations
//!
//! - Uses pre-computed JWT keys from AppState (no per-request allocation)
//! - Password hashing runs on blocking thread pool (doesn't block async runtime)

use crate::auth::AuthenticatedPrincipal;
use super::extract::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use expense_tracker_shared::types::{AuthToken, LoginRequest, RegisterRequest, UserProfile};
use expense_tracker_shared::validation::{validate_password, validate_username};
use validator::Validate;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// Register a new user
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<Json<UserProfile>> {
    req.validate()?;
    validate_username(&req.username).map_err(ApiError::Validation)?;
    validate_password(&req.password).map_err(ApiError::Validation)?;

    let credential = UserService::register(
        state.credentials(),
        state.passwords(),
        &req.username,
        &req.password,
        req.role,
    )
    .await?;

    Ok(Json(UserProfile {
        username: credential.username,
        role: credential.role,
    }))
}

/// Login with username and password
///
/// POST /api/auth/login
///
/// # Performance
/// Password verification is offloaded to blocking thread pool.
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthToken>> {
    let token = UserService::login(
        state.credentials(),
        state.passwords(),
        state.tokens(),
        &req.username,
        &req.password,
    )
    .await?;

    Ok(Json(token))
}

/// Current principal
///
/// GET /api/auth/me
async fn me(principal: AuthenticatedPrincipal) -> Json<UserProfile> {
    Json(UserProfile {
        username: principal.subject,
        role: principal.role,
    })
}
