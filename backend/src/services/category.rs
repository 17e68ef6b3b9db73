//! Category service
//!
//! Validates names and translates repository failures into API errors.

use crate::error::ApiError;
use crate::repositories::{is_conflict, CategoryRecord, CategoryRepository};
use expense_tracker_shared::validation::validate_category_name;
use expense_tracker_shared::Category;
use sqlx::PgPool;
use tracing::info;

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

/// Category service for business logic
pub struct CategoryService;

impl CategoryService {
    /// Create a category with a unique name
    pub async fn create(pool: &PgPool, name: &str) -> Result<Category, ApiError> {
        let name = Self::clean_name(name)?;

        let record = CategoryRepository::create(pool, name)
            .await
            .map_err(|e| Self::map_write_error(e, name))?;

        info!(category_id = record.id, "Category created");
        Ok(record.into())
    }

    /// List all categories
    ///
    /// An empty table is reported as not found rather than an empty list.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, ApiError> {
        let records = CategoryRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?;

        if records.is_empty() {
            return Err(ApiError::NotFound("Categories not added yet".to_string()));
        }

        Ok(records.into_iter().map(Category::from).collect())
    }

    /// Get a category by ID
    pub async fn get(pool: &PgPool, id: i32) -> Result<Category, ApiError> {
        CategoryRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .map(Category::from)
            .ok_or_else(|| Self::not_found(id))
    }

    /// Rename a category
    pub async fn rename(pool: &PgPool, id: i32, name: &str) -> Result<Category, ApiError> {
        let name = Self::clean_name(name)?;

        let record = CategoryRepository::rename(pool, id, name)
            .await
            .map_err(|e| Self::map_write_error(e, name))?
            .ok_or_else(|| Self::not_found(id))?;

        info!(category_id = id, "Category renamed");
        Ok(record.into())
    }

    /// Delete a category and every expense filed under it
    pub async fn delete(pool: &PgPool, id: i32) -> Result<(), ApiError> {
        let deleted = CategoryRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(Self::not_found(id));
        }

        info!(category_id = id, "Category deleted");
        Ok(())
    }

    fn clean_name(name: &str) -> Result<&str, ApiError> {
        let name = name.trim();
        validate_category_name(name).map_err(ApiError::Validation)?;
        Ok(name)
    }

    fn not_found(id: i32) -> ApiError {
        ApiError::NotFound(format!("Category with id {} not found", id))
    }

    fn map_write_error(err: anyhow::Error, name: &str) -> ApiError {
        if is_conflict(&err) {
            ApiError::Conflict(format!("Category '{}' already exists", name))
        } else {
            ApiError::Internal(err)
        }
    }
}
