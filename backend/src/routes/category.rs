//! Category routes

use super::extract::{ApiJson, ApiPath};
use crate::error::ApiResult;
use crate::services::CategoryService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use expense_tracker_shared::types::{CategoryRequest, DeletedResponse};
use expense_tracker_shared::Category;
use validator::Validate;

/// Create category routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_category))
        .route("/all", get(list_categories))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// POST /api/category/add
async fn add_category(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> ApiResult<Json<Category>> {
    req.validate()?;
    let category = CategoryService::create(state.db(), &req.name).await?;
    Ok(Json(category))
}

/// GET /api/category/all
async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = CategoryService::list(state.db()).await?;
    Ok(Json(categories))
}

/// GET /api/category/:id
async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Category>> {
    let category = CategoryService::get(state.db(), id).await?;
    Ok(Json(category))
}

/// PUT /api/category/:id
async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> ApiResult<Json<Category>> {
    req.validate()?;
    let category = CategoryService::rename(state.db(), id, &req.name).await?;
    Ok(Json(category))
}

/// DELETE /api/category/:id
async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<DeletedResponse>> {
    CategoryService::delete(state.db(), id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}
