//! Expense routes
//!
//! All endpoints require authentication; the filter in front of the router
//! rejects requests without a valid token before they reach these handlers.

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::error::ApiResult;
use crate::services::ExpenseService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use expense_tracker_shared::types::{
    CategoryTotalResponse, DateRangeQuery, DeletedResponse, ExpenseRequest,
};
use expense_tracker_shared::Expense;
use validator::Validate;

/// Create expense routes
pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/date-range", get(expenses_by_date_range))
        .route("/category/:category_id", get(expenses_by_category))
        .route("/total/category/:category_id", get(total_by_category))
        .route(
            "/:id",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// Record an expense
///
/// POST /api/expenses
async fn create_expense(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ExpenseRequest>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    req.validate()?;
    let expense = ExpenseService::create(state.db(), &req).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// List all expenses
///
/// GET /api/expenses
async fn list_expenses(State(state): State<AppState>) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = ExpenseService::list(state.db()).await?;
    Ok(Json(expenses))
}

/// GET /api/expenses/:id
async fn get_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Expense>> {
    let expense = ExpenseService::get(state.db(), id).await?;
    Ok(Json(expense))
}

/// Replace an expense
///
/// PUT /api/expenses/:id
async fn update_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<ExpenseRequest>,
) -> ApiResult<Json<Expense>> {
    req.validate()?;
    let expense = ExpenseService::update(state.db(), id, &req).await?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id
async fn delete_expense(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<DeletedResponse>> {
    ExpenseService::delete(state.db(), id).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}

/// GET /api/expenses/category/:category_id
async fn expenses_by_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i32>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = ExpenseService::by_category(state.db(), category_id).await?;
    Ok(Json(expenses))
}

/// Expenses within an inclusive date range
///
/// GET /api/expenses/date-range?start=YYYY-MM-DD&end=YYYY-MM-DD
async fn expenses_by_date_range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = ExpenseService::by_date_range(state.db(), query.start, query.end).await?;
    Ok(Json(expenses))
}

/// GET /api/expenses/total/category/:category_id
async fn total_by_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i32>,
) -> ApiResult<Json<CategoryTotalResponse>> {
    let total = ExpenseService::total_by_category(state.db(), category_id).await?;
    Ok(Json(CategoryTotalResponse { category_id, total }))
}
