//! # In-Memory Store
//!
//! A [`Store`] kept entirely in process memory. Used by tests and by
//! `crm-api` when started with an ephemeral database.
//!
//! ## Transactions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  begin()                                                                │
//! │    lock state (OwnedMutexGuard) ──► clone into `staged`                 │
//! │                                                                         │
//! │  tx.insert_customer / tx.customer_email_exists                          │
//! │    operate on `staged` only                                             │
//! │                                                                         │
//! │  commit()   → *guard = staged, unlock                                   │
//! │  rollback() → drop staged, unlock                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is held for the whole transaction, so transactions are
//! serialized against each other and against plain store calls.
//! Constraints mirror the SQLite schema: unique email, positive price,
//! non-negative stock and order references.

use std::sync::Arc;

use async_trait::async_trait;
use crm_core::{Customer, Order, Product};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{Store, StoreTx};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    /// `(order_id, product_id)` pairs.
    order_products: Vec<(String, String)>,
}

impl MemoryState {
    fn email_exists(&self, email: &str) -> bool {
        self.customers.iter().any(|c| c.email == email)
    }

    fn insert_customer(&mut self, customer: &Customer) -> DbResult<()> {
        if self.customers.iter().any(|c| c.id == customer.id) {
            return Err(DbError::duplicate("customers.id", &customer.id));
        }
        if self.email_exists(&customer.email) {
            return Err(DbError::duplicate("customers.email", &customer.email));
        }
        self.customers.push(customer.clone());
        Ok(())
    }

    fn insert_product(&mut self, product: &Product) -> DbResult<()> {
        if product.price_cents <= 0 {
            return Err(DbError::CheckViolation("price_cents > 0".to_string()));
        }
        if product.stock < 0 {
            return Err(DbError::CheckViolation("stock >= 0".to_string()));
        }
        if self.products.iter().any(|p| p.id == product.id) {
            return Err(DbError::duplicate("products.id", &product.id));
        }
        self.products.push(product.clone());
        Ok(())
    }

    fn insert_order(&mut self, order: &Order, product_ids: &[String]) -> DbResult<()> {
        if !self.customers.iter().any(|c| c.id == order.customer_id) {
            return Err(DbError::foreign_key(format!(
                "unknown customer {}",
                order.customer_id
            )));
        }
        if self.orders.iter().any(|o| o.id == order.id) {
            return Err(DbError::duplicate("orders.id", &order.id));
        }

        let mut links: Vec<(String, String)> = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            if !self.products.iter().any(|p| &p.id == product_id) {
                return Err(DbError::foreign_key(format!("unknown product {product_id}")));
            }
            if links.iter().any(|(_, p)| p == product_id) {
                return Err(DbError::duplicate(
                    "order_products.order_id, order_products.product_id",
                    product_id,
                ));
            }
            links.push((order.id.clone(), product_id.clone()));
        }

        self.orders.push(order.clone());
        self.order_products.extend(links);
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Process-local store. Cloning shares the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> DbResult<Box<dyn StoreTx>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTx { guard, staged }))
    }

    async fn customer_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let state = self.state.lock().await;
        Ok(state.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn customer_email_exists(&self, email: &str) -> DbResult<bool> {
        Ok(self.state.lock().await.email_exists(email))
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<()> {
        self.state.lock().await.insert_customer(customer)
    }

    async fn list_customers(&self) -> DbResult<Vec<Customer>> {
        Ok(self.state.lock().await.customers.clone())
    }

    async fn count_customers(&self) -> DbResult<i64> {
        Ok(self.state.lock().await.customers.len() as i64)
    }

    async fn product_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let state = self.state.lock().await;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn products_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        let state = self.state.lock().await;
        Ok(state
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert_product(&self, product: &Product) -> DbResult<()> {
        self.state.lock().await.insert_product(product)
    }

    async fn list_products(&self) -> DbResult<Vec<Product>> {
        Ok(self.state.lock().await.products.clone())
    }

    async fn order_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let state = self.state.lock().await;
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn order_products(&self, order_id: &str) -> DbResult<Vec<Product>> {
        let state = self.state.lock().await;
        let linked: Vec<&String> = state
            .order_products
            .iter()
            .filter(|(o, _)| o == order_id)
            .map(|(_, p)| p)
            .collect();
        Ok(state
            .products
            .iter()
            .filter(|p| linked.contains(&&p.id))
            .cloned()
            .collect())
    }

    async fn insert_order(&self, order: &Order, product_ids: &[String]) -> DbResult<()> {
        self.state.lock().await.insert_order(order, product_ids)?;
        debug!(order_id = %order.id, "Order stored in memory");
        Ok(())
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        Ok(self.state.lock().await.orders.clone())
    }

    async fn count_orders(&self) -> DbResult<i64> {
        Ok(self.state.lock().await.orders.len() as i64)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// Staged copy of the state, published on commit.
struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn customer_email_exists(&mut self, email: &str) -> DbResult<bool> {
        Ok(self.staged.email_exists(email))
    }

    async fn insert_customer(&mut self, customer: &Customer) -> DbResult<()> {
        self.staged.insert_customer(customer)
    }

    async fn commit(self: Box<Self>) -> DbResult<()> {
        let MemoryTx { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DbResult<()> {
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
