//! # crm-service: Mutation Handlers
//!
//! One async handler per use case. Each one validates with crm-core,
//! reads and writes through `&dyn Store`, and returns a payload.
//!
//! ## Result Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ok(payload with entity)     → created                                 │
//! │  Ok(payload without entity)  → rejected, reason in message / errors    │
//! │  Err(DbError)                → store fault, nothing from this call     │
//! │                                was committed                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use crm_service::{create_customer, CreateCustomerInput};
//!
//! let payload = create_customer(&db, CreateCustomerInput {
//!     name: "Alice".into(),
//!     email: "alice@example.com".into(),
//!     phone: None,
//! }).await?;
//! assert_eq!(payload.message, "Customer created successfully");
//! ```

pub mod bulk;
pub mod customer;
pub mod order;
pub mod payload;
pub mod product;

#[cfg(test)]
mod testing;

pub use bulk::{bulk_create_customers, RowError};
pub use customer::{create_customer, CreateCustomerInput};
pub use order::{create_order, CreateOrderInput};
pub use payload::{BulkCustomersPayload, CustomerPayload, OrderPayload, ProductPayload};
pub use product::{create_product, CreateProductInput};
