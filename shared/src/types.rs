//! API request and response types

use crate::models::Role;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
}

// ============================================================================
// Category Types
// ============================================================================

/// Create or rename a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

// ============================================================================
// Expense Types
// ============================================================================

/// Create or replace an expense
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseRequest {
    pub amount: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    pub date: NaiveDate,
    pub category_id: i32,
}

/// Inclusive date range filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Sum of expense amounts for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotalResponse {
    pub category_id: i32,
    pub total: Decimal,
}

/// Deletion acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}
