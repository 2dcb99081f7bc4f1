//! # Store Abstraction
//!
//! The persistence contract the service layer is written against.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Contract                                  │
//! │                                                                         │
//! │  crm-service handlers                                                   │
//! │       │  &dyn Store                                                     │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐      begin()      ┌──────────────────────┐       │
//! │  │      Store       │ ────────────────► │  Box<dyn StoreTx>    │       │
//! │  │  reads / inserts │                   │  scoped reads/writes │       │
//! │  └──────────────────┘                   │  commit / rollback   │       │
//! │       │                                 └──────────────────────┘       │
//! │       ├── Database     (SQLite via sqlx)                               │
//! │       └── MemoryStore  (tests, ephemeral runs)                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every single `Store` insert is atomic on its own. `insert_order` writes the
//! order row and its product links together. Multi-statement work that must
//! succeed or fail as a whole goes through [`with_transaction`].

use async_trait::async_trait;
use crm_core::{Customer, Order, Product};
use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

// =============================================================================
// Store
// =============================================================================

/// Persistence operations over customers, products and orders.
///
/// Lists are returned in insertion order.
#[async_trait]
pub trait Store: Send + Sync {
    /// Opens a unit of work. Nothing written through it is visible to
    /// other readers until [`StoreTx::commit`].
    async fn begin(&self) -> DbResult<Box<dyn StoreTx>>;

    // ---- customers ----
    async fn customer_by_id(&self, id: &str) -> DbResult<Option<Customer>>;
    async fn customer_email_exists(&self, email: &str) -> DbResult<bool>;
    async fn insert_customer(&self, customer: &Customer) -> DbResult<()>;
    async fn list_customers(&self) -> DbResult<Vec<Customer>>;
    async fn count_customers(&self) -> DbResult<i64>;

    // ---- products ----
    async fn product_by_id(&self, id: &str) -> DbResult<Option<Product>>;

    /// Returns the stored products whose id is in `ids`, each at most once.
    async fn products_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>>;
    async fn insert_product(&self, product: &Product) -> DbResult<()>;
    async fn list_products(&self) -> DbResult<Vec<Product>>;

    // ---- orders ----
    async fn order_by_id(&self, id: &str) -> DbResult<Option<Order>>;

    /// Products linked to an order.
    async fn order_products(&self, order_id: &str) -> DbResult<Vec<Product>>;

    /// Inserts the order and one link per product id, atomically.
    async fn insert_order(&self, order: &Order, product_ids: &[String]) -> DbResult<()>;
    async fn list_orders(&self) -> DbResult<Vec<Order>>;
    async fn count_orders(&self) -> DbResult<i64>;
}

/// An open unit of work.
///
/// Dropping a transaction without calling `commit` discards its writes.
#[async_trait]
pub trait StoreTx: Send {
    /// Sees rows inserted earlier in the same transaction.
    async fn customer_email_exists(&mut self, email: &str) -> DbResult<bool>;
    async fn insert_customer(&mut self, customer: &Customer) -> DbResult<()>;

    async fn commit(self: Box<Self>) -> DbResult<()>;
    async fn rollback(self: Box<Self>) -> DbResult<()>;
}

// =============================================================================
// Transaction Scope
// =============================================================================

/// Runs `f` inside a transaction.
///
/// ## Outcome
/// ```text
/// f returns Ok(value)  → commit   → Ok(value)  (commit failure → Err)
/// f returns Err(e)     → rollback → Err(e)     (rollback failure is logged)
/// ```
///
/// ## Example
/// ```rust,ignore
/// let created = with_transaction(store, |tx| {
///     Box::pin(async move {
///         tx.insert_customer(&customer).await?;
///         Ok::<_, DbError>(customer)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<T, E, F>(store: &dyn Store, f: F) -> Result<T, E>
where
    F: for<'t> FnOnce(&'t mut dyn StoreTx) -> BoxFuture<'t, Result<T, E>>,
    E: From<DbError>,
{
    let mut tx = store.begin().await?;
    debug!("Transaction started");

    let outcome = f(tx.as_mut()).await;

    match outcome {
        Ok(value) => {
            tx.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            } else {
                debug!("Transaction rolled back");
            }
            Err(err)
        }
    }
}
