//! Expense service
//!
//! Provides business logic for expenses including:
//! - Amount, description and date validation
//! - Category existence checks
//! - Per-category totals and date-range queries

use crate::error::ApiError;
use crate::repositories::{
    is_conflict, is_missing_reference, CategoryRepository, ExpenseRecord, ExpenseRepository,
    SaveExpense,
};
use chrono::{NaiveDate, Utc};
use expense_tracker_shared::types::ExpenseRequest;
use expense_tracker_shared::validation::{
    validate_amount, validate_date_range, validate_description, validate_expense_date,
};
use expense_tracker_shared::Expense;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

impl From<ExpenseRecord> for Expense {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount,
            description: record.description,
            date: record.expense_date,
            category_id: record.category_id,
        }
    }
}

/// Expense service for business logic
pub struct ExpenseService;

impl ExpenseService {
    /// Record a new expense
    ///
    /// An unknown category is a bad request here; the expense cannot be
    /// filed anywhere.
    pub async fn create(pool: &PgPool, req: &ExpenseRequest) -> Result<Expense, ApiError> {
        let input = Self::prepare(req, Utc::now().date_naive())?;

        if !Self::category_exists(pool, input.category_id).await? {
            return Err(Self::unknown_category(input.category_id));
        }

        let record = ExpenseRepository::create(pool, &input)
            .await
            .map_err(|e| Self::map_write_error(e, &input))?;

        info!(
            expense_id = record.id,
            category_id = record.category_id,
            "Expense recorded"
        );
        Ok(record.into())
    }

    /// Replace every field of an existing expense
    pub async fn update(pool: &PgPool, id: i64, req: &ExpenseRequest) -> Result<Expense, ApiError> {
        let input = Self::prepare(req, Utc::now().date_naive())?;

        if !Self::category_exists(pool, input.category_id).await? {
            return Err(ApiError::NotFound(format!(
                "Category with id {} not found",
                input.category_id
            )));
        }

        let record = ExpenseRepository::update(pool, id, &input)
            .await
            .map_err(|e| Self::map_write_error(e, &input))?
            .ok_or_else(|| Self::not_found(id))?;

        info!(expense_id = id, "Expense updated");
        Ok(record.into())
    }

    /// List every expense, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Expense>, ApiError> {
        let records = ExpenseRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Expense::from).collect())
    }

    /// Get an expense by ID
    pub async fn get(pool: &PgPool, id: i64) -> Result<Expense, ApiError> {
        ExpenseRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .map(Expense::from)
            .ok_or_else(|| Self::not_found(id))
    }

    /// List expenses filed under one category
    pub async fn by_category(pool: &PgPool, category_id: i32) -> Result<Vec<Expense>, ApiError> {
        let records = ExpenseRepository::find_by_category(pool, category_id)
            .await
            .map_err(ApiError::Internal)?;

        if records.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No expenses found for category {}",
                category_id
            )));
        }

        Ok(records.into_iter().map(Expense::from).collect())
    }

    /// List expenses dated within an inclusive range
    pub async fn by_date_range(
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, ApiError> {
        validate_date_range(start, end).map_err(ApiError::BadRequest)?;

        let records = ExpenseRepository::find_by_date_range(pool, start, end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Expense::from).collect())
    }

    /// Sum of amounts filed under a category
    pub async fn total_by_category(pool: &PgPool, category_id: i32) -> Result<Decimal, ApiError> {
        ExpenseRepository::total_by_category(pool, category_id)
            .await
            .map_err(ApiError::Internal)
    }

    /// Delete an expense
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), ApiError> {
        let deleted = ExpenseRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(Self::not_found(id));
        }

        info!(expense_id = id, "Expense deleted");
        Ok(())
    }

    /// Validate a request against `today` and normalize it for storage
    fn prepare(req: &ExpenseRequest, today: NaiveDate) -> Result<SaveExpense, ApiError> {
        validate_amount(req.amount).map_err(ApiError::Validation)?;
        validate_description(&req.description).map_err(ApiError::Validation)?;
        validate_expense_date(req.date, today).map_err(ApiError::Validation)?;

        Ok(SaveExpense {
            amount: req.amount,
            description: req.description.trim().to_string(),
            date: req.date,
            category_id: req.category_id,
        })
    }

    async fn category_exists(pool: &PgPool, category_id: i32) -> Result<bool, ApiError> {
        CategoryRepository::exists(pool, category_id)
            .await
            .map_err(ApiError::Internal)
    }

    fn not_found(id: i64) -> ApiError {
        ApiError::NotFound(format!("Expense with id {} not found", id))
    }

    fn unknown_category(category_id: i32) -> ApiError {
        ApiError::BadRequest(format!("Category with id {} does not exist", category_id))
    }

    fn map_write_error(err: anyhow::Error, input: &SaveExpense) -> ApiError {
        if is_conflict(&err) {
            ApiError::Conflict(format!(
                "Expense '{}' already exists",
                input.description
            ))
        } else if is_missing_reference(&err) {
            // Category removed between the existence check and the write
            Self::unknown_category(input.category_id)
        } else {
            ApiError::Internal(err)
        }
    }
}
