//! # Repository Module
//!
//! SQLite repository implementations for the CRM store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Store impl for Database (crate::sqlite)                               │
//! │       │                                                                 │
//! │       │  db.orders().insert(&order, &product_ids)                      │
//! │       ▼                                                                 │
//! │  CustomerRepository   ProductRepository   OrderRepository              │
//! │  ├── get_by_id        ├── get_by_id       ├── get_by_id                │
//! │  ├── email_exists     ├── get_many        ├── get_products             │
//! │  ├── insert           ├── insert          ├── insert (+ links, tx)     │
//! │  ├── list / count     └── list            └── list / count             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer reads and inserts
//! - [`ProductRepository`](product::ProductRepository) - Product reads, batch lookup, inserts
//! - [`OrderRepository`](order::OrderRepository) - Orders with their product links

pub mod customer;
pub mod order;
pub mod product;
