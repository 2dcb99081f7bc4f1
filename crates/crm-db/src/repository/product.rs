//! # Product Repository
//!
//! SQLite operations for products.
//!
//! ## Batch Lookup
//! ```text
//! products_by_ids(["p1", "p2", "p1", "zz"])
//!       │
//!       ▼
//! SELECT ... WHERE id IN (?, ?, ?, ?) ORDER BY rowid
//!       │
//!       ▼
//! [p1, p2]   ← each stored product once, unknown ids dropped
//! ```

use crm_core::Product;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price_cents, stock FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    /// Fetches every stored product whose id appears in `ids`.
    ///
    /// Duplicate ids collapse to one row; unknown ids are skipped.
    pub async fn get_many(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT id, name, price_cents, stock FROM products WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(") ORDER BY rowid");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(requested = ids.len(), found = products.len(), "Batch product lookup");
        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// The schema enforces `price_cents > 0` and `stock >= 0`.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query("INSERT INTO products (id, name, price_cents, stock) VALUES (?1, ?2, ?3, ?4)")
            .bind(&product.id)
            .bind(&product.name)
            .bind(product.price_cents)
            .bind(product.stock)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists all products in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price_cents, stock FROM products ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Deletes every product. Used by the seed binary.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
