//! # SQLite Store
//!
//! [`Store`] implementation on top of [`Database`] and its repositories.
//!
//! ```text
//! Store method            → Repository call
//! ─────────────────────────────────────────────────────────
//! begin()                 → pool.begin()  → SqliteTx
//! customer_email_exists   → CustomerRepository::email_exists
//! products_by_ids         → ProductRepository::get_many
//! insert_order            → OrderRepository::insert (own tx)
//! ...
//! ```

use async_trait::async_trait;
use crm_core::{Customer, Order, Product};
use sqlx::{Sqlite, Transaction};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::customer;
use crate::store::{Store, StoreTx};

#[async_trait]
impl Store for Database {
    async fn begin(&self) -> DbResult<Box<dyn StoreTx>> {
        let tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        Ok(Box::new(SqliteTx { tx }))
    }

    async fn customer_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        self.customers().get_by_id(id).await
    }

    async fn customer_email_exists(&self, email: &str) -> DbResult<bool> {
        self.customers().email_exists(email).await
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<()> {
        self.customers().insert(customer).await
    }

    async fn list_customers(&self) -> DbResult<Vec<Customer>> {
        self.customers().list().await
    }

    async fn count_customers(&self) -> DbResult<i64> {
        self.customers().count().await
    }

    async fn product_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        self.products().get_by_id(id).await
    }

    async fn products_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        self.products().get_many(ids).await
    }

    async fn insert_product(&self, product: &Product) -> DbResult<()> {
        self.products().insert(product).await
    }

    async fn list_products(&self) -> DbResult<Vec<Product>> {
        self.products().list().await
    }

    async fn order_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        self.orders().get_by_id(id).await
    }

    async fn order_products(&self, order_id: &str) -> DbResult<Vec<Product>> {
        self.orders().get_products(order_id).await
    }

    async fn insert_order(&self, order: &Order, product_ids: &[String]) -> DbResult<()> {
        self.orders().insert(order, product_ids).await
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        self.orders().list().await
    }

    async fn count_orders(&self) -> DbResult<i64> {
        self.orders().count().await
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// An open SQLite transaction.
///
/// sqlx rolls the transaction back when it is dropped uncommitted.
pub struct SqliteTx {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl StoreTx for SqliteTx {
    async fn customer_email_exists(&mut self, email: &str) -> DbResult<bool> {
        customer::email_exists(&mut *self.tx, email).await
    }

    async fn insert_customer(&mut self, customer: &Customer) -> DbResult<()> {
        customer::insert(&mut *self.tx, customer).await
    }

    async fn commit(self: Box<Self>) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }

    async fn rollback(self: Box<Self>) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::store::with_transaction;
    use crm_core::{Money, NewCustomer, NewProduct};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn customer(email: &str) -> Customer {
        NewCustomer::new("Test", email, None).into_customer()
    }

    fn product(name: &str, cents: i64) -> Product {
        NewProduct {
            name: name.to_string(),
            price: Money::from_cents(cents),
            stock: 5,
        }
        .into_product()
    }

    #[tokio::test]
    async fn test_customer_round_trip_and_unique_email() {
        let db = db().await;
        let alice = customer("alice@example.com");
        db.insert_customer(&alice).await.unwrap();

        assert_eq!(db.customer_by_id(&alice.id).await.unwrap(), Some(alice.clone()));
        assert!(db.customer_email_exists("alice@example.com").await.unwrap());
        assert!(!db.customer_email_exists("ALICE@example.com").await.unwrap());

        let err = db.insert_customer(&customer("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(db.count_customers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lists_follow_insertion_order() {
        let db = db().await;
        for email in ["z@example.com", "a@example.com", "m@example.com"] {
            db.insert_customer(&customer(email)).await.unwrap();
        }
        let emails: Vec<String> = db
            .list_customers()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.email)
            .collect();
        assert_eq!(emails, ["z@example.com", "a@example.com", "m@example.com"]);
    }

    #[tokio::test]
    async fn test_check_constraints() {
        let db = db().await;
        let mut bad = product("Broken", 100);
        bad.price_cents = 0;
        let err = db.insert_product(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation(_)));

        let mut bad = product("Broken", 100);
        bad.stock = -1;
        assert!(db.insert_product(&bad).await.is_err());
        assert!(db.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_products_by_ids_deduplicates_and_skips_unknown() {
        let db = db().await;
        let laptop = product("Laptop", 99_999);
        let phone = product("Phone", 49_999);
        db.insert_product(&laptop).await.unwrap();
        db.insert_product(&phone).await.unwrap();

        let ids = vec![laptop.id.clone(), laptop.id.clone(), "missing".to_string()];
        let found = db.products_by_ids(&ids).await.unwrap();
        assert_eq!(found, vec![laptop]);
        assert!(db.products_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_with_links() {
        let db = db().await;
        let alice = customer("alice@example.com");
        db.insert_customer(&alice).await.unwrap();
        let laptop = product("Laptop", 99_999);
        let phone = product("Phone", 49_999);
        db.insert_product(&laptop).await.unwrap();
        db.insert_product(&phone).await.unwrap();

        let products = vec![laptop.clone(), phone.clone()];
        let order = Order::for_products(&alice.id, &products, Some(chrono::Utc::now())).unwrap();
        let ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        db.insert_order(&order, &ids).await.unwrap();

        let stored = db.order_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount_cents, 149_998);
        assert_eq!(stored.customer_id, alice.id);
        assert!(stored.order_date.is_some());
        assert_eq!(db.order_products(&order.id).await.unwrap(), products);
    }

    #[tokio::test]
    async fn test_order_with_unknown_customer_is_not_kept() {
        let db = db().await;
        let laptop = product("Laptop", 99_999);
        db.insert_product(&laptop).await.unwrap();

        let order = Order::for_products("nobody", std::slice::from_ref(&laptop), None).unwrap();
        let err = db.insert_order(&order, &[laptop.id.clone()]).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.count_orders().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transaction_commit_and_rollback() {
        let db = db().await;

        let committed = customer("kept@example.com");
        let c = committed.clone();
        with_transaction(&db, move |tx| {
            Box::pin(async move {
                tx.insert_customer(&c).await?;
                assert!(tx.customer_email_exists("kept@example.com").await?);
                Ok::<_, DbError>(())
            })
        })
        .await
        .unwrap();

        let dropped = customer("dropped@example.com");
        let result: Result<(), DbError> = with_transaction(&db, move |tx| {
            Box::pin(async move {
                tx.insert_customer(&dropped).await?;
                Err(DbError::Internal("abort".to_string()))
            })
        })
        .await;

        assert!(result.is_err());
        assert!(db.customer_email_exists("kept@example.com").await.unwrap());
        assert!(!db.customer_email_exists("dropped@example.com").await.unwrap());
        assert_eq!(db.count_customers().await.unwrap(), 1);
    }
}
