//! Category repository for database operations

use anyhow::Result;
use sqlx::PgPool;

/// Category record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
}

/// Category repository for database operations
pub struct CategoryRepository;

impl CategoryRepository {
    /// Create a new category
    pub async fn create(pool: &PgPool, name: &str) -> Result<CategoryRecord> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List every category ordered by name
    pub async fn list(pool: &PgPool) -> Result<Vec<CategoryRecord>> {
        let records = sqlx::query_as::<_, CategoryRecord>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find category by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<CategoryRecord>> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            SELECT id, name
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Check whether a category exists
    pub async fn exists(pool: &PgPool, id: i32) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Rename a category, returning `None` if it does not exist
    pub async fn rename(pool: &PgPool, id: i32, name: &str) -> Result<Option<CategoryRecord>> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            UPDATE categories SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a category; its expenses go with it
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
