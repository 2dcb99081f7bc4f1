//! # CreateOrder
//!
//! ## Flow
//! ```text
//! customer_id ──► customer_by_id ── None ──► "Invalid customer ID <id>"
//!                      │
//! product_ids ──► products_by_ids ── [] ──► "No valid products found"
//!                      │
//!          found < requested ──────────────► "Some product IDs are invalid"
//!                      │
//!          total = Σ price  (Order::for_products) ── overflow ──► "Order total is out of range"
//!                      │
//!          insert_order (order + links, atomic)
//! ```
//!
//! Requesting the same id twice counts as an invalid id: lookups return a
//! set, so `found < requested`.

use chrono::{DateTime, Utc};
use crm_core::{Order, OrderDetails, ValidationError};
use crm_db::{DbResult, Store};
use serde::Deserialize;
use tracing::{debug, info};

use crate::payload::OrderPayload;

/// Input of the createOrder mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateOrderInput {
    pub customer_id: String,
    pub product_ids: Vec<String>,
    /// Stored as given; left empty when absent.
    pub order_date: Option<DateTime<Utc>>,
}

/// Creates one order for an existing customer.
pub async fn create_order(store: &dyn Store, input: CreateOrderInput) -> DbResult<OrderPayload> {
    let CreateOrderInput {
        customer_id,
        product_ids,
        order_date,
    } = input;

    let Some(customer) = store.customer_by_id(&customer_id).await? else {
        return Ok(rejected(ValidationError::InvalidCustomer { id: customer_id }));
    };

    let products = store.products_by_ids(&product_ids).await?;
    if products.is_empty() {
        return Ok(rejected(ValidationError::NoValidProducts));
    }
    if products.len() < product_ids.len() {
        debug!(
            requested = product_ids.len(),
            found = products.len(),
            "Unresolved product ids"
        );
        return Ok(rejected(ValidationError::InvalidProductIds));
    }

    let order = match Order::for_products(&customer.id, &products, order_date) {
        Ok(order) => order,
        Err(reason) => return Ok(rejected(reason)),
    };
    let linked: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
    store.insert_order(&order, &linked).await?;

    info!(
        id = %order.id,
        customer_id = %customer.id,
        total = %order.total_amount(),
        "Order created"
    );
    Ok(OrderPayload::created(OrderDetails {
        order,
        customer,
        products,
    }))
}

fn rejected(reason: ValidationError) -> OrderPayload {
    debug!(category = ?reason.category(), %reason, "Order rejected");
    OrderPayload::rejected(reason)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::{create_customer, CreateCustomerInput};
    use crate::payload::ORDER_CREATED;
    use crate::product::{create_product, CreateProductInput};
    use crate::testing::stores;
    use crm_core::{Customer, Product};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    async fn customer(store: &dyn Store) -> Customer {
        create_customer(
            store,
            CreateCustomerInput {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                phone: None,
            },
        )
        .await
        .unwrap()
        .customer
        .unwrap()
    }

    async fn product(store: &dyn Store, name: &str, price: &str) -> Product {
        create_product(
            store,
            CreateProductInput {
                name: name.to_string(),
                price: Decimal::from_str(price).unwrap(),
                stock: Some(3),
            },
        )
        .await
        .unwrap()
        .product
        .unwrap()
    }

    #[tokio::test]
    async fn test_total_is_exact_sum() {
        for (kind, store) in stores().await {
            let store = store.as_ref();
            let alice = customer(store).await;
            let laptop = product(store, "Laptop", "999.99").await;
            let phone = product(store, "Phone", "499.99").await;
            let date = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc);

            let payload = create_order(
                store,
                CreateOrderInput {
                    customer_id: alice.id.clone(),
                    product_ids: vec![laptop.id.clone(), phone.id.clone()],
                    order_date: Some(date),
                },
            )
            .await
            .unwrap();

            assert_eq!(payload.message, ORDER_CREATED, "{kind}");
            let details = payload.order.unwrap();
            assert_eq!(details.order.total_amount().to_string(), "1499.98", "{kind}");
            assert_eq!(details.customer, alice);
            assert_eq!(details.products, vec![laptop, phone]);

            let stored = store.order_by_id(&details.order.id).await.unwrap().unwrap();
            assert_eq!(stored.order_date, Some(date), "{kind}");
            assert_eq!(store.order_products(&stored.id).await.unwrap().len(), 2);
        }
    }

    #[tokio::test]
    async fn test_unknown_customer_creates_nothing() {
        for (kind, store) in stores().await {
            let store = store.as_ref();
            let laptop = product(store, "Laptop", "999.99").await;

            let payload = create_order(
                store,
                CreateOrderInput {
                    customer_id: "missing-id".to_string(),
                    product_ids: vec![laptop.id],
                    order_date: None,
                },
            )
            .await
            .unwrap();

            assert_eq!(payload.order, None, "{kind}");
            assert_eq!(payload.message, "Invalid customer ID missing-id", "{kind}");
            assert_eq!(store.count_orders().await.unwrap(), 0, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_product_resolution_failures() {
        for (kind, store) in stores().await {
            let store = store.as_ref();
            let alice = customer(store).await;
            let laptop = product(store, "Laptop", "999.99").await;

            let cases = [
                (vec![], "No valid products found"),
                (vec!["nope".to_string()], "No valid products found"),
                (vec![laptop.id.clone(), "nope".to_string()], "Some product IDs are invalid"),
                // Same id twice is reported as invalid
                (vec![laptop.id.clone(), laptop.id.clone()], "Some product IDs are invalid"),
            ];

            for (product_ids, expected) in cases {
                let payload = create_order(
                    store,
                    CreateOrderInput {
                        customer_id: alice.id.clone(),
                        product_ids,
                        order_date: None,
                    },
                )
                .await
                .unwrap();
                assert_eq!(payload.order, None, "{kind}");
                assert_eq!(payload.message, expected, "{kind}");
            }
            assert_eq!(store.count_orders().await.unwrap(), 0, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_total_overflow_creates_nothing() {
        for (kind, store) in stores().await {
            let store = store.as_ref();
            let alice = customer(store).await;
            let yacht = product(store, "Yacht", "50000000000000000.00").await;
            let jet = product(store, "Jet", "50000000000000000.00").await;

            let payload = create_order(
                store,
                CreateOrderInput {
                    customer_id: alice.id,
                    product_ids: vec![yacht.id, jet.id],
                    order_date: None,
                },
            )
            .await
            .unwrap();

            assert_eq!(payload.order, None, "{kind}");
            assert_eq!(payload.message, "Order total is out of range", "{kind}");
            assert_eq!(store.count_orders().await.unwrap(), 0, "{kind}");
        }
    }

    #[tokio::test]
    async fn test_order_date_is_never_server_filled() {
        for (kind, store) in stores().await {
            let store = store.as_ref();
            let alice = customer(store).await;
            let laptop = product(store, "Laptop", "10.00").await;

            let payload = create_order(
                store,
                CreateOrderInput {
                    customer_id: alice.id,
                    product_ids: vec![laptop.id],
                    order_date: None,
                },
            )
            .await
            .unwrap();

            let id = payload.order.unwrap().order.id;
            assert_eq!(store.order_by_id(&id).await.unwrap().unwrap().order_date, None, "{kind}");
        }
    }
}
