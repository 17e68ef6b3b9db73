//! Expense repository for database operations

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Expense record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExpenseRecord {
    pub id: i64,
    pub amount: Decimal,
    pub description: String,
    pub expense_date: NaiveDate,
    pub category_id: i32,
}

/// Input for creating or replacing an expense
#[derive(Debug, Clone)]
pub struct SaveExpense {
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub category_id: i32,
}

/// Expense repository for database operations
pub struct ExpenseRepository;

impl ExpenseRepository {
    /// Create a new expense
    pub async fn create(pool: &PgPool, input: &SaveExpense) -> Result<ExpenseRecord> {
        let record = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            INSERT INTO expenses (amount, description, expense_date, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, amount, description, expense_date, category_id
            "#,
        )
        .bind(input.amount)
        .bind(&input.description)
        .bind(input.date)
        .bind(input.category_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Replace every field of an expense, returning `None` if it does not exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: &SaveExpense,
    ) -> Result<Option<ExpenseRecord>> {
        let record = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            UPDATE expenses SET
                amount = $2,
                description = $3,
                expense_date = $4,
                category_id = $5
            WHERE id = $1
            RETURNING id, amount, description, expense_date, category_id
            "#,
        )
        .bind(id)
        .bind(input.amount)
        .bind(&input.description)
        .bind(input.date)
        .bind(input.category_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List every expense, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<ExpenseRecord>> {
        let records = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, amount, description, expense_date, category_id
            FROM expenses
            ORDER BY expense_date DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get expense by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ExpenseRecord>> {
        let record = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, amount, description, expense_date, category_id
            FROM expenses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Get expenses belonging to one category
    pub async fn find_by_category(pool: &PgPool, category_id: i32) -> Result<Vec<ExpenseRecord>> {
        let records = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, amount, description, expense_date, category_id
            FROM expenses
            WHERE category_id = $1
            ORDER BY expense_date DESC, id DESC
            "#,
        )
        .bind(category_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get expenses dated within `[start, end]`
    pub async fn find_by_date_range(
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExpenseRecord>> {
        let records = sqlx::query_as::<_, ExpenseRecord>(
            r#"
            SELECT id, amount, description, expense_date, category_id
            FROM expenses
            WHERE expense_date BETWEEN $1 AND $2
            ORDER BY expense_date DESC, id DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Sum of amounts for one category; zero when it has no expenses
    pub async fn total_by_category(pool: &PgPool, category_id: i32) -> Result<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM expenses
            WHERE category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_one(pool)
        .await?;

        Ok(total)
    }

    /// Delete an expense
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
