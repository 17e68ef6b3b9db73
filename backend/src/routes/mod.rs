//! Route definitions for the Expense Tracker API
//!
//! This module organizes all API routes and applies middleware.

use crate::auth::authorize;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::path::Path;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod assets;
mod auth;
mod category;
mod expense;
mod extract;
mod health;


pub use self::auth::auth_routes;
pub use category::category_routes;
pub use expense::expense_routes;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all middleware
///
/// The authorization filter wraps every route, so unknown paths are
/// rejected with 401 unless the request carries a valid token.
pub fn create_router(state: AppState) -> Router {
    let assets_dir = Path::new(&state.config().assets.dir).to_path_buf();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api", api_routes())
        .merge(assets::asset_routes(&assets_dir))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        // Apply middleware layers
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unmatched paths that made it past the authorization filter
async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/category", category_routes())
        .nest("/expenses", expense_routes())
}
