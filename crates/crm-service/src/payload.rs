//! # Mutation Payloads
//!
//! Every mutation answers with a success-shaped payload. Validation
//! failures are carried in `message` / `errors`, never as a fault.
//!
//! ```text
//! createCustomer  → CustomerPayload  { customer?, message }
//! createProduct   → ProductPayload   { product?,  message }
//! createOrder     → OrderPayload     { order?,    message }
//! bulkCreate...   → BulkCustomersPayload { customers[], errors[] }
//! ```

use crm_core::{Customer, OrderDetails, Product, ValidationError};
use serde::Serialize;

pub const CUSTOMER_CREATED: &str = "Customer created successfully";
pub const PRODUCT_CREATED: &str = "Product created successfully";
pub const ORDER_CREATED: &str = "Order created successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerPayload {
    pub customer: Option<Customer>,
    pub message: String,
}

impl CustomerPayload {
    pub fn created(customer: Customer) -> Self {
        CustomerPayload {
            customer: Some(customer),
            message: CUSTOMER_CREATED.to_string(),
        }
    }

    pub fn rejected(reason: ValidationError) -> Self {
        CustomerPayload {
            customer: None,
            message: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub product: Option<Product>,
    pub message: String,
}

impl ProductPayload {
    pub fn created(product: Product) -> Self {
        ProductPayload {
            product: Some(product),
            message: PRODUCT_CREATED.to_string(),
        }
    }

    pub fn rejected(reason: ValidationError) -> Self {
        ProductPayload {
            product: None,
            message: reason.to_string(),
        }
    }
}

/// The created order comes back with its customer and products resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    pub order: Option<OrderDetails>,
    pub message: String,
}

impl OrderPayload {
    pub fn created(order: OrderDetails) -> Self {
        OrderPayload {
            order: Some(order),
            message: ORDER_CREATED.to_string(),
        }
    }

    pub fn rejected(reason: ValidationError) -> Self {
        OrderPayload {
            order: None,
            message: reason.to_string(),
        }
    }
}

/// Result of a bulk create: what was stored and why the rest was not.
///
/// Both lists follow input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkCustomersPayload {
    pub customers: Vec<Customer>,
    pub errors: Vec<String>,
}
