//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD with the category joined into every read
//! - Case-insensitive name filter
//! - Conditional stock decrement for the checkout unit of work
//!
//! ## Stock Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  ❌ WRONG: read stock, check in Rust, write absolute value             │
//! │     SELECT stock ...;  UPDATE products SET stock = 7                   │
//! │     (two checkouts can both read 10 and both write 7)                  │
//! │                                                                         │
//! │  ✅ CORRECT: one conditional delta statement                           │
//! │     UPDATE products SET stock = stock - 3                              │
//! │     WHERE id = ? AND stock >= 3                                        │
//! │     RETURNING name, price, stock                                       │
//! │                                                                         │
//! │  Zero rows back → product missing or not enough stock.                 │
//! │  The returned name/price are the values the sale is recorded with.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::ProductStore;
use kasir_core::checkout::ProductSnapshot;
use kasir_core::validation::{validate_id, validate_new_product};
use kasir_core::{CategoryRef, NewProduct, Product};

const SELECT_PRODUCT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.stock,
        p.category_id,
        c.name AS category_name
    FROM products p
    LEFT JOIN product_categories c ON c.id = p.category_id
"#;

/// Flat row of the product/category join.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    stock: i64,
    category_id: Option<i64>,
    category_name: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(CategoryRef { id, name }),
            _ => None,
        };
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            stock: row.stock,
            category_id: row.category_id,
            category,
        }
    }
}

/// Escapes LIKE wildcards so a filter matches literally.
fn like_pattern(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len() + 2);
    escaped.push('%');
    for ch in filter.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let drinks = repo.list(Some("teh")).await?;
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Reads the fields a checkout line depends on.
    pub async fn snapshot(&self, id: i64) -> DbResult<Option<ProductSnapshot>> {
        let snapshot = sqlx::query_as::<_, ProductSnapshot>(
            "SELECT id AS product_id, name, price, stock FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    /// Conditionally removes `quantity` units from stock.
    ///
    /// Runs on the caller's connection so it joins the caller's transaction.
    ///
    /// ## Returns
    /// * `Ok(Some(snapshot))` - Decremented; `snapshot.stock` is the stock
    ///   *before* this sale
    /// * `Ok(None)` - Product missing or stock below `quantity`; nothing changed
    pub async fn decrement_stock(
        conn: &mut SqliteConnection,
        id: i64,
        quantity: i64,
    ) -> DbResult<Option<ProductSnapshot>> {
        debug!(id, quantity, "Decrementing stock");

        let row: Option<(String, i64, i64)> = sqlx::query_as(
            r#"
            UPDATE products
            SET stock = stock - ?1
            WHERE id = ?2 AND stock >= ?1
            RETURNING name, price, stock
            "#,
        )
        .bind(quantity)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(|(name, price, remaining)| ProductSnapshot {
            product_id: id,
            name,
            price,
            stock: remaining + quantity,
        }))
    }

    /// Current stock of a product on the caller's connection.
    pub async fn stock_on(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<i64>> {
        let stock = sqlx::query_scalar::<_, i64>("SELECT stock FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(stock)
    }

    /// Resolves the optional category reference of a create/update payload.
    async fn category_ref(&self, category_id: Option<i64>) -> DbResult<Option<CategoryRef>> {
        let Some(category_id) = category_id else {
            return Ok(None);
        };

        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM product_categories WHERE id = ?1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(id, name)| CategoryRef { id, name })
            .map(Some)
            .ok_or_else(|| DbError::not_found("Category", category_id))
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<Product>> {
        let filter = name_filter.map(str::trim).filter(|f| !f.is_empty());

        debug!(filter = ?filter, "Listing products");

        let rows = match filter {
            Some(filter) => {
                let sql = format!(
                    "{} WHERE p.name LIKE ?1 ESCAPE '\\' ORDER BY p.id",
                    SELECT_PRODUCT
                );
                sqlx::query_as::<_, ProductRow>(&sql)
                    .bind(like_pattern(filter))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{} ORDER BY p.id", SELECT_PRODUCT);
                sqlx::query_as::<_, ProductRow>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("{} WHERE p.id = ?1", SELECT_PRODUCT);
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    async fn create(&self, product: &NewProduct) -> DbResult<Product> {
        validate_new_product(product)?;
        let category = self.category_ref(product.category_id).await?;

        debug!(name = %product.name, "Inserting product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(product.name.trim())
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Product {
            id,
            name: product.name.trim().to_string(),
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
            category,
        })
    }

    async fn update(&self, id: i64, product: &NewProduct) -> DbResult<Product> {
        validate_id("id", id)?;
        validate_new_product(product)?;
        let category = self.category_ref(product.category_id).await?;

        debug!(id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                stock = ?4,
                category_id = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(product.name.trim())
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(Product {
            id,
            name: product.name.trim().to_string(),
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
            category,
        })
    }

    /// Hard delete. Sale history keeps its snapshot of the product.
    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CategoryStore;
    use crate::{Database, DbConfig};
    use kasir_core::{ErrorKind, NewCategory};

    fn new_product(name: &str, price: i64, stock: i64, category_id: Option<i64>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            stock,
            category_id,
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("teh"), "%teh%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }

    #[tokio::test]
    async fn test_product_crud_with_category() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .create(&NewCategory {
                name: "Makanan".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let repo = db.products();
        let created = repo
            .create(&new_product("Indomie Goreng", 3500, 40, Some(category.id)))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.category.as_ref().map(|c| c.name.as_str()), Some("Makanan"));

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = repo
            .update(created.id, &new_product("Indomie Soto", 3600, 35, None))
            .await
            .unwrap();
        assert_eq!(updated.name, "Indomie Soto");
        assert!(updated.category.is_none());
        assert_eq!(repo.get_by_id(created.id).await.unwrap().unwrap(), updated);

        assert_eq!(repo.count().await.unwrap(), 1);
        repo.delete(created.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.delete(created.id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitively_in_id_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        for name in ["Teh Botol", "Kopi Kapal Api", "Teh Pucuk", "Es TEH Manis"] {
            repo.create(&new_product(name, 4000, 10, None)).await.unwrap();
        }

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let teh: Vec<String> = repo
            .list(Some("teh"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(teh, vec!["Teh Botol", "Teh Pucuk", "Es TEH Manis"]);

        assert_eq!(repo.list(Some("   ")).await.unwrap().len(), 4);
        assert!(repo.list(Some("%")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let err = repo.create(&new_product("", 1000, 1, None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = repo.create(&new_product("Gula", -1, 1, None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = repo.create(&new_product("Gula", 1000, -5, None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = repo.create(&new_product("Gula", 1000, 5, Some(77))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_decrement_stock_is_conditional() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .create(&new_product("Aqua 600ml", 3000, 5, None))
            .await
            .unwrap();

        let mut conn = db.pool().acquire().await.unwrap();

        let snapshot = ProductRepository::decrement_stock(&mut conn, product.id, 3)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.stock, 5);
        assert_eq!(snapshot.price, 3000);
        assert_eq!(ProductRepository::stock_on(&mut conn, product.id).await.unwrap(), Some(2));

        let refused = ProductRepository::decrement_stock(&mut conn, product.id, 3)
            .await
            .unwrap();
        assert!(refused.is_none());
        assert_eq!(ProductRepository::stock_on(&mut conn, product.id).await.unwrap(), Some(2));

        let missing = ProductRepository::decrement_stock(&mut conn, 999, 1).await.unwrap();
        assert!(missing.is_none());
        assert_eq!(ProductRepository::stock_on(&mut conn, 999).await.unwrap(), None);
    }
}
