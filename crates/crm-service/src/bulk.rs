//! # BulkCreateCustomers
//!
//! Creates many customers in one call, keeping the valid rows and
//! reporting the rest.
//!
//! ## Processing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  with_transaction ─────────────────────────────────────────────────┐   │
//! │  │                                                                  │   │
//! │  │  for row i (1-based), in input order:                            │   │
//! │  │     email syntax   ✗ → "Row i: Invalid email <email>"            │   │
//! │  │     email unused   ✗ → "Row i: Email already exists (<email>)"   │   │
//! │  │        (sees rows inserted earlier in this call)                 │   │
//! │  │     phone syntax   ✗ → "Row i: Invalid phone format (<phone>)"   │   │
//! │  │     name present   ✗ → "Row i: Name is required"                 │   │
//! │  │     all pass         → insert inside the transaction             │   │
//! │  │                                                                  │   │
//! │  └─ Ok  → commit: every inserted row becomes visible together       │   │
//! │     Err → rollback: no row of this call is kept, the call fails     │   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected row never stops processing. Only a store fault does.

use crm_core::validation::{validate_email, validate_name, validate_phone};
use crm_core::{CustomerRecord, ErrorCategory, NewCustomer};
use crm_db::{with_transaction, DbError, DbResult, Store, StoreTx};
use thiserror::Error;
use tracing::{info, warn};

use crate::payload::BulkCustomersPayload;

/// Why a bulk row was skipped. Displays as the caller-facing error string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Row {row}: Invalid email {email}")]
    InvalidEmail { row: usize, email: String },

    #[error("Row {row}: Email already exists ({email})")]
    DuplicateEmail { row: usize, email: String },

    #[error("Row {row}: Invalid phone format ({phone})")]
    InvalidPhone { row: usize, phone: String },

    #[error("Row {row}: Name is required")]
    NameRequired { row: usize },
}

impl RowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RowError::InvalidEmail { .. } | RowError::InvalidPhone { .. } => ErrorCategory::Format,
            RowError::DuplicateEmail { .. } => ErrorCategory::Uniqueness,
            RowError::NameRequired { .. } => ErrorCategory::Required,
        }
    }
}

/// Creates every valid record inside a single transaction.
///
/// ## Returns
/// * `Ok(payload)` - committed customers plus one error per skipped row
/// * `Err(DbError)` - a store fault; the transaction was rolled back
pub async fn bulk_create_customers(
    store: &dyn Store,
    records: Vec<CustomerRecord>,
) -> DbResult<BulkCustomersPayload> {
    let submitted = records.len();

    let payload = with_transaction(store, move |tx| {
        Box::pin(async move {
            let mut payload = BulkCustomersPayload::default();

            for (index, record) in records.iter().enumerate() {
                match admit_row(&mut *tx, index + 1, record).await? {
                    Ok(new_customer) => {
                        let customer = new_customer.into_customer();
                        tx.insert_customer(&customer).await?;
                        payload.customers.push(customer);
                    }
                    Err(row_error) => {
                        warn!(
                            category = ?row_error.category(),
                            error = %row_error,
                            "Bulk row rejected"
                        );
                        payload.errors.push(row_error.to_string());
                    }
                }
            }

            Ok::<_, DbError>(payload)
        })
    })
    .await?;

    info!(
        submitted,
        created = payload.customers.len(),
        rejected = payload.errors.len(),
        "Bulk customer create committed"
    );
    Ok(payload)
}

/// Runs the row checks in order against the transaction's view.
async fn admit_row(
    tx: &mut dyn StoreTx,
    row: usize,
    record: &CustomerRecord,
) -> DbResult<Result<NewCustomer, RowError>> {
    let email = record.email();
    let phone = record.phone();

    let email = match email {
        Some(email) if validate_email(&email).is_ok() => email,
        other => {
            return Ok(Err(RowError::InvalidEmail {
                row,
                email: CustomerRecord::display(other.as_deref()).to_string(),
            }))
        }
    };

    if tx.customer_email_exists(&email).await? {
        return Ok(Err(RowError::DuplicateEmail { row, email }));
    }

    if validate_phone(phone.as_deref()).is_err() {
        return Ok(Err(RowError::InvalidPhone {
            row,
            phone: CustomerRecord::display(phone.as_deref()).to_string(),
        }));
    }

    let name = match record.name() {
        Some(name) if validate_name(&name).is_ok() => name,
        _ => return Ok(Err(RowError::NameRequired { row })),
    };

    Ok(Ok(NewCustomer::new(name, email, phone)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stores, FailingStore};
    use crm_db::MemoryStore;
    use serde_json::{json, Value};

    fn records(values: Vec<Value>) -> Vec<CustomerRecord> {
        values.into_iter().map(CustomerRecord::from).collect()
    }

    #[tokio::test]
    async fn test_malformed_email_skips_only_that_row() {
        for (kind, store) in stores().await {
            let input = records(vec![
                json!({"name": "A", "email": "a@example.com"}),
                json!({"name": "B", "email": "bad-email"}),
                json!({"name": "C", "email": "c@example.com", "phone": "555-0100"}),
            ]);

            let payload = bulk_create_customers(store.as_ref(), input).await.unwrap();

            assert_eq!(payload.errors, vec!["Row 2: Invalid email bad-email"], "{kind}");
            let emails: Vec<&str> = payload.customers.iter().map(|c| c.email.as_str()).collect();
            assert_eq!(emails, ["a@example.com", "c@example.com"], "{kind}");
            assert_eq!(store.count_customers().await.unwrap(), 2, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_duplicate_within_same_call_is_visible() {
        for (kind, store) in stores().await {
            let input = records(vec![
                json!({"name": "First", "email": "same@example.com"}),
                json!({"name": "Second", "email": "same@example.com"}),
            ]);

            let payload = bulk_create_customers(store.as_ref(), input).await.unwrap();

            assert_eq!(payload.customers.len(), 1, "{kind}");
            assert_eq!(payload.customers[0].name, "First");
            assert_eq!(
                payload.errors,
                vec!["Row 2: Email already exists (same@example.com)"],
                "{kind}"
            );
        }
    }

    #[tokio::test]
    async fn test_duplicate_of_previously_stored_customer() {
        for (kind, store) in stores().await {
            let first = bulk_create_customers(
                store.as_ref(),
                records(vec![json!({"name": "Old", "email": "old@example.com"})]),
            )
            .await
            .unwrap();
            assert!(first.errors.is_empty(), "{kind}");

            let second = bulk_create_customers(
                store.as_ref(),
                records(vec![json!({"name": "New", "email": "old@example.com"})]),
            )
            .await
            .unwrap();
            assert!(second.customers.is_empty(), "{kind}");
            assert_eq!(second.errors, vec!["Row 1: Email already exists (old@example.com)"]);
        }
    }

    #[tokio::test]
    async fn test_error_strings_and_order() {
        for (kind, store) in stores().await {
            let input = records(vec![
                json!({"name": "NoEmail"}),
                json!({"name": "BadPhone", "email": "p@example.com", "phone": "555 0100"}),
                json!({"email": "noname@example.com"}),
                json!({"name": "Num", "email": 42}),
                json!("not an object"),
                json!({"name": "Ok", "email": "ok@example.com", "phone": "+44 20 7946 0000"}),
            ]);

            let payload = bulk_create_customers(store.as_ref(), input).await.unwrap();

            assert_eq!(
                payload.errors,
                vec![
                    "Row 1: Invalid email None",
                    "Row 2: Invalid phone format (555 0100)",
                    "Row 3: Name is required",
                    "Row 4: Invalid email 42",
                    "Row 5: Invalid email None",
                ],
                "{kind}"
            );
            assert_eq!(payload.customers.len(), 1, "{kind}");
            assert_eq!(payload.customers[0].email, "ok@example.com");
        }
    }

    #[test]
    fn test_row_error_categories() {
        let email = "a@x.com".to_string();
        assert_eq!(
            RowError::InvalidEmail { row: 1, email: email.clone() }.category(),
            ErrorCategory::Format
        );
        assert_eq!(RowError::DuplicateEmail { row: 2, email }.category(), ErrorCategory::Uniqueness);
        assert_eq!(RowError::NameRequired { row: 3 }.category(), ErrorCategory::Required);
    }

    #[tokio::test]
    async fn test_empty_input() {
        for (kind, store) in stores().await {
            let payload = bulk_create_customers(store.as_ref(), Vec::new()).await.unwrap();
            assert_eq!(payload, BulkCustomersPayload::default(), "{kind}");
        }
    }

    #[tokio::test]
    async fn test_store_fault_rolls_back_whole_call() {
        let store = FailingStore::new(MemoryStore::new(), 2);
        let input = records(vec![
            json!({"name": "A", "email": "a@example.com"}),
            json!({"name": "B", "email": "b@example.com"}),
            json!({"name": "C", "email": "c@example.com"}),
        ]);

        let result = bulk_create_customers(&store, input).await;

        assert!(matches!(result, Err(DbError::Internal(_))));
        assert_eq!(store.count_customers().await.unwrap(), 0);
        assert!(!store.customer_email_exists("a@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_store_fault_rolls_back_on_sqlite() {
        let db = crm_db::Database::new(crm_db::DbConfig::in_memory()).await.unwrap();
        let store = FailingStore::new(db, 3);
        let input = records(vec![
            json!({"name": "A", "email": "a@example.com"}),
            json!({"name": "B", "email": "b@example.com"}),
            json!({"name": "C", "email": "c@example.com"}),
        ]);

        assert!(bulk_create_customers(&store, input).await.is_err());
        assert_eq!(store.inner.count_customers().await.unwrap(), 0);
    }
}
