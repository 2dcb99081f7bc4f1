//! # Domain Types
//!
//! Entities persisted by the store, plus the validated inputs that create them.
//!
//! ## Entity Relationships
//! ```text
//! ┌────────────┐ 1      * ┌────────────┐ *      * ┌────────────┐
//! │  Customer  │──────────│   Order    │──────────│  Product   │
//! │            │          │            │          │            │
//! │ id         │          │ id         │          │ id         │
//! │ name       │          │ customer_id│          │ name       │
//! │ email (UQ) │          │ total_cents│          │ price_cents│
//! │ phone?     │          │ order_date?│          │ stock      │
//! └────────────┘          └────────────┘          └────────────┘
//!                          order_products (order_id, product_id)
//! ```
//!
//! ## Strict vs Loose Input
//! `New*` types are only built after validation passed. Raw bulk input
//! lives in [`crate::record::CustomerRecord`] until then.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Generates a new entity identifier (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address, unique across all customers.
    pub email: String,

    /// Optional phone number (`+...` or digits and hyphens).
    pub phone: Option<String>,
}

/// A customer that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    /// Builds a new customer input. An empty phone is stored as absent.
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        NewCustomer {
            name: name.into(),
            email: email.into(),
            phone: phone.filter(|p| !p.is_empty()),
        }
    }

    /// Assigns an identifier, producing the entity to persist.
    pub fn into_customer(self) -> Customer {
        Customer {
            id: generate_id(),
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price in cents. Always > 0.
    pub price_cents: i64,

    /// Units in stock. Always >= 0.
    pub stock: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A product that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl NewProduct {
    /// Assigns an identifier, producing the entity to persist.
    pub fn into_product(self) -> Product {
        Product {
            id: generate_id(),
            name: self.name,
            price_cents: self.price.cents(),
            stock: self.stock,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed by one customer for one or more products.
///
/// The product set lives in the `order_products` association and is
/// loaded separately (see [`OrderDetails`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning customer.
    pub customer_id: String,

    /// Sum of the product prices at creation time, in cents.
    pub total_amount_cents: i64,

    /// Caller-supplied order date. Never filled in by the server.
    pub order_date: Option<DateTime<Utc>>,
}

impl Order {
    /// Builds an order whose total is derived from `products`.
    ///
    /// ## Invariant
    /// `total_amount` always equals the sum of the given products' prices.
    /// There is no way to set it independently.
    ///
    /// ## Errors
    /// [`ValidationError::TotalOutOfRange`] when the sum overflows.
    pub fn for_products(
        customer_id: impl Into<String>,
        products: &[Product],
        order_date: Option<DateTime<Utc>>,
    ) -> ValidationResult<Self> {
        let total = Money::checked_sum(products.iter().map(Product::price))
            .ok_or(ValidationError::TotalOutOfRange)?;
        Ok(Order {
            id: generate_id(),
            customer_id: customer_id.into(),
            total_amount_cents: total.cents(),
            order_date,
        })
    }

    /// Returns the total as a Money type.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

/// An order with its customer and product set resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Customer,
    pub products: Vec<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64) -> Product {
        NewProduct {
            name: "Item".to_string(),
            price: Money::from_cents(price_cents),
            stock: 1,
        }
        .into_product()
    }

    #[test]
    fn test_order_total_is_sum_of_prices() {
        let products = vec![product(99_999), product(49_999)];
        let order = Order::for_products("c1", &products, None).unwrap();
        assert_eq!(order.total_amount_cents, 149_998);
        assert_eq!(order.total_amount().to_string(), "1499.98");
        assert!(order.order_date.is_none());
    }

    #[test]
    fn test_order_total_overflow_is_rejected() {
        let products = vec![product(i64::MAX / 2 + 1), product(i64::MAX / 2 + 1)];
        assert_eq!(
            Order::for_products("c1", &products, None),
            Err(ValidationError::TotalOutOfRange)
        );
    }

    #[test]
    fn test_new_customer_drops_empty_phone() {
        let c = NewCustomer::new("Bob", "bob@example.com", Some(String::new()));
        assert_eq!(c.phone, None);

        let c = NewCustomer::new("Alice", "alice@example.com", Some("+123".to_string()));
        assert_eq!(c.phone.as_deref(), Some("+123"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = NewCustomer::new("A", "a@example.com", None).into_customer();
        let b = NewCustomer::new("A", "a@example.com", None).into_customer();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }
}
