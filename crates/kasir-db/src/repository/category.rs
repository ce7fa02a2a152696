//! # Category Repository
//!
//! Database operations for product categories.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::CategoryStore;
use kasir_core::validation::{validate_id, validate_new_category};
use kasir_core::{NewCategory, ProductCategory};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list(&self) -> DbResult<Vec<ProductCategory>> {
        let categories = sqlx::query_as::<_, ProductCategory>(
            "SELECT id, name, description FROM product_categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<ProductCategory>> {
        let category = sqlx::query_as::<_, ProductCategory>(
            "SELECT id, name, description FROM product_categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, category: &NewCategory) -> DbResult<ProductCategory> {
        validate_new_category(category)?;
        debug!(name = %category.name, "Inserting category");

        let created = sqlx::query_as::<_, ProductCategory>(
            r#"
            INSERT INTO product_categories (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            "#,
        )
        .bind(category.name.trim())
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i64, category: &NewCategory) -> DbResult<ProductCategory> {
        validate_id("id", id)?;
        validate_new_category(category)?;
        debug!(id, "Updating category");

        sqlx::query_as::<_, ProductCategory>(
            r#"
            UPDATE product_categories
            SET name = ?2, description = ?3
            WHERE id = ?1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(category.name.trim())
        .bind(&category.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Category", id))
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM product_categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::ForeignKeyViolation { .. } => DbError::StillReferenced {
                    entity: "Category".to_string(),
                    id: id.to_string(),
                    referenced_by: "products".to_string(),
                },
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
