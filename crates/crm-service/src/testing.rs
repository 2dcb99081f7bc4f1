//! Test fixtures shared by the handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use crm_core::{Customer, Order, Product};
use crm_db::{Database, DbConfig, DbError, DbResult, MemoryStore, Store, StoreTx};

/// Both store implementations, freshly created and empty.
pub async fn stores() -> Vec<(&'static str, Box<dyn Store>)> {
    let sqlite = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory sqlite");
    vec![
        ("memory", Box::new(MemoryStore::new()) as Box<dyn Store>),
        ("sqlite", Box::new(sqlite) as Box<dyn Store>),
    ]
}

/// Wraps a store and fails the Nth customer insert made inside a
/// transaction (1-based, counted across transactions).
pub struct FailingStore<S> {
    pub inner: S,
    fail_on: usize,
    inserts: Arc<AtomicUsize>,
}

impl<S: Store> FailingStore<S> {
    pub fn new(inner: S, fail_on: usize) -> Self {
        FailingStore {
            inner,
            fail_on,
            inserts: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl<S: Store> Store for FailingStore<S> {
    async fn begin(&self) -> DbResult<Box<dyn StoreTx>> {
        Ok(Box::new(FailingTx {
            inner: self.inner.begin().await?,
            fail_on: self.fail_on,
            inserts: self.inserts.clone(),
        }))
    }

    async fn customer_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        self.inner.customer_by_id(id).await
    }

    async fn customer_email_exists(&self, email: &str) -> DbResult<bool> {
        self.inner.customer_email_exists(email).await
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<()> {
        self.inner.insert_customer(customer).await
    }

    async fn list_customers(&self) -> DbResult<Vec<Customer>> {
        self.inner.list_customers().await
    }

    async fn count_customers(&self) -> DbResult<i64> {
        self.inner.count_customers().await
    }

    async fn product_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        self.inner.product_by_id(id).await
    }

    async fn products_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        self.inner.products_by_ids(ids).await
    }

    async fn insert_product(&self, product: &Product) -> DbResult<()> {
        self.inner.insert_product(product).await
    }

    async fn list_products(&self) -> DbResult<Vec<Product>> {
        self.inner.list_products().await
    }

    async fn order_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        self.inner.order_by_id(id).await
    }

    async fn order_products(&self, order_id: &str) -> DbResult<Vec<Product>> {
        self.inner.order_products(order_id).await
    }

    async fn insert_order(&self, order: &Order, product_ids: &[String]) -> DbResult<()> {
        self.inner.insert_order(order, product_ids).await
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        self.inner.list_orders().await
    }

    async fn count_orders(&self) -> DbResult<i64> {
        self.inner.count_orders().await
    }
}

struct FailingTx {
    inner: Box<dyn StoreTx>,
    fail_on: usize,
    inserts: Arc<AtomicUsize>,
}

#[async_trait]
impl StoreTx for FailingTx {
    async fn customer_email_exists(&mut self, email: &str) -> DbResult<bool> {
        self.inner.customer_email_exists(email).await
    }

    async fn insert_customer(&mut self, customer: &Customer) -> DbResult<()> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on {
            return Err(DbError::Internal("injected fault".to_string()));
        }
        self.inner.insert_customer(customer).await
    }

    async fn commit(self: Box<Self>) -> DbResult<()> {
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> DbResult<()> {
        self.inner.rollback().await
    }
}
