//! # Customer Repository
//!
//! SQLite operations for customers.
//!
//! The query helpers are generic over the executor so the same SQL serves
//! both the pool ([`CustomerRepository`]) and an open transaction
//! ([`crate::sqlite::SqliteTx`]).

use crm_core::Customer;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.customers();
/// if !repo.email_exists("alice@example.com").await? {
///     repo.insert(&customer).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT id, name, email, phone FROM customers WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(customer)
    }

    /// Checks whether any stored customer has exactly this email.
    pub async fn email_exists(&self, email: &str) -> DbResult<bool> {
        email_exists(&self.pool, email).await
    }

    /// Inserts a new customer.
    ///
    /// Fails with `UniqueViolation` if the email is already stored.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        insert(&self.pool, customer).await
    }

    /// Lists all customers in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT id, name, email, phone FROM customers ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    /// Counts stored customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Deletes every customer. Used by the seed binary.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM customers").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Executor-Generic Queries
// =============================================================================

pub(crate) async fn email_exists<'e, E>(executor: E, email: &str) -> DbResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let matches: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE email = ?1")
        .bind(email)
        .fetch_one(executor)
        .await?;
    Ok(matches > 0)
}

pub(crate) async fn insert<'e, E>(executor: E, customer: &Customer) -> DbResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    debug!(id = %customer.id, "Inserting customer");

    sqlx::query("INSERT INTO customers (id, name, email, phone) VALUES (?1, ?2, ?3, ?4)")
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .execute(executor)
        .await?;

    Ok(())
}
