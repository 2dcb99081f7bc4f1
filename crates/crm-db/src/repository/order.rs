//! # Order Repository
//!
//! SQLite operations for orders and their product links.
//!
//! ## Order Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    INSERT INTO orders (id, customer_id, total_amount_cents, order_date) │
//! │    INSERT INTO order_products (order_id, product_id)   × N             │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure → the transaction is dropped → nothing is visible         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crm_core::{Order, Product};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, customer_id, total_amount_cents, order_date FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    /// Products linked to an order, in product insertion order.
    pub async fn get_products(&self, order_id: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.id, p.name, p.price_cents, p.stock
            FROM products p
            INNER JOIN order_products op ON op.product_id = p.id
            WHERE op.order_id = ?1
            ORDER BY p.rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Inserts an order together with its product links.
    ///
    /// ## Atomicity
    /// Both tables are written in one transaction. If any link fails
    /// (unknown product, duplicate pair) the order row is not kept either.
    pub async fn insert(&self, order: &Order, product_ids: &[String]) -> DbResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            "INSERT INTO orders (id, customer_id, total_amount_cents, order_date) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.total_amount_cents)
        .bind(order.order_date)
        .execute(&mut *tx)
        .await?;

        for product_id in product_ids {
            sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES (?1, ?2)")
                .bind(&order.id)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            products = product_ids.len(),
            total_cents = order.total_amount_cents,
            "Order stored"
        );
        Ok(())
    }

    /// Lists all orders in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, customer_id, total_amount_cents, order_date FROM orders ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// Counts stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Deletes every order and order link. Used by the seed binary.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM order_products").execute(&mut *tx).await?;
        let result = sqlx::query("DELETE FROM orders").execute(&mut *tx).await?;
        tx.commit().await?;

        debug!(deleted = result.rows_affected(), "Orders cleared");
        Ok(result.rows_affected())
    }
}
