//! # CreateCustomer
//!
//! ## Check Order
//! ```text
//! email syntax ──fail──► "Invalid email format"
//!      │
//! email unused ──fail──► "Email already exists"
//!      │
//! phone syntax ──fail──► "Invalid phone format"
//!      │
//! name present ──fail──► "Name is required"
//!      │
//!      ▼
//! insert → "Customer created successfully"
//! ```
//! The first failing check wins and nothing is written.

use crm_core::error::ValidationResult;
use crm_core::validation::{validate_email, validate_name, validate_phone};
use crm_core::{NewCustomer, ValidationError};
use crm_db::{DbError, DbResult, Store};
use serde::Deserialize;
use tracing::{debug, info};

use crate::payload::CustomerPayload;

/// Input of the createCustomer mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Creates one customer.
///
/// ## Returns
/// * `Ok(payload)` - customer created, or rejected with a reason
/// * `Err(DbError)` - the store failed
pub async fn create_customer(
    store: &dyn Store,
    input: CreateCustomerInput,
) -> DbResult<CustomerPayload> {
    let new_customer = match admit(store, input).await? {
        Ok(new_customer) => new_customer,
        Err(reason) => {
            debug!(category = ?reason.category(), %reason, "Customer rejected");
            return Ok(CustomerPayload::rejected(reason));
        }
    };

    let customer = new_customer.into_customer();
    match store.insert_customer(&customer).await {
        Ok(()) => {}
        // Lost a race against a concurrent insert of the same email
        Err(DbError::UniqueViolation { .. }) => {
            return Ok(CustomerPayload::rejected(ValidationError::DuplicateEmail));
        }
        Err(err) => return Err(err),
    }

    info!(id = %customer.id, email = %customer.email, "Customer created");
    Ok(CustomerPayload::created(customer))
}

async fn admit(
    store: &dyn Store,
    input: CreateCustomerInput,
) -> DbResult<ValidationResult<NewCustomer>> {
    let CreateCustomerInput { name, email, phone } = input;

    if let Err(reason) = validate_email(&email) {
        return Ok(Err(reason));
    }
    if store.customer_email_exists(&email).await? {
        return Ok(Err(ValidationError::DuplicateEmail));
    }

    let checks = validate_phone(phone.as_deref()).and_then(|()| validate_name(&name));
    Ok(checks.map(|()| NewCustomer::new(name, email, phone)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::CUSTOMER_CREATED;
    use crate::testing::stores;

    fn input(name: &str, email: &str, phone: Option<&str>) -> CreateCustomerInput {
        CreateCustomerInput {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_customer_success() {
        for (kind, store) in stores().await {
            let payload = create_customer(
                store.as_ref(),
                input("Alice", "alice@example.com", Some("+1234567890")),
            )
            .await
            .unwrap();

            assert_eq!(payload.message, CUSTOMER_CREATED, "{kind}");
            let customer = payload.customer.unwrap();
            assert_eq!(customer.phone.as_deref(), Some("+1234567890"));

            let stored = store.list_customers().await.unwrap();
            assert_eq!(stored, vec![customer], "{kind}");
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_wins_over_other_checks() {
        for (kind, store) in stores().await {
            let first = create_customer(store.as_ref(), input("A", "dup@example.com", None))
                .await
                .unwrap();
            assert!(first.customer.is_some(), "{kind}");

            // Different name and a bad phone: the duplicate still wins
            let second = create_customer(store.as_ref(), input("B", "dup@example.com", Some("abc")))
                .await
                .unwrap();
            assert_eq!(second.customer, None);
            assert_eq!(second.message, "Email already exists", "{kind}");
            assert_eq!(store.count_customers().await.unwrap(), 1, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_identical_input_twice_creates_one_customer() {
        for (kind, store) in stores().await {
            let req = input("Alice", "alice@example.com", None);
            let first = create_customer(store.as_ref(), req.clone()).await.unwrap();
            let second = create_customer(store.as_ref(), req).await.unwrap();

            assert_eq!(first.message, CUSTOMER_CREATED, "{kind}");
            assert_eq!(second.message, "Email already exists", "{kind}");
            assert_eq!(store.count_customers().await.unwrap(), 1, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_rejections_write_nothing() {
        for (kind, store) in stores().await {
            let cases = [
                (input("A", "not-an-email", Some("abc")), "Invalid email format"),
                (input("A", "a@example.com", Some("555 0100")), "Invalid phone format"),
                (input("  ", "a@example.com", None), "Name is required"),
            ];
            for (req, expected) in cases {
                let payload = create_customer(store.as_ref(), req).await.unwrap();
                assert_eq!(payload.customer, None, "{kind}");
                assert_eq!(payload.message, expected, "{kind}");
            }
            assert_eq!(store.count_customers().await.unwrap(), 0, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_empty_phone_is_stored_as_absent() {
        for (kind, store) in stores().await {
            let payload = create_customer(store.as_ref(), input("Bob", "bob@example.com", Some("")))
                .await
                .unwrap();
            assert_eq!(payload.customer.unwrap().phone, None, "{kind}");
        }
    }
}
