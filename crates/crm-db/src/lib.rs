//! # crm-db: Entity Store for the CRM Service
//!
//! This crate provides persistence for customers, products and orders.
//! It uses SQLite with sqlx for durable storage and offers an in-memory
//! implementation of the same contract.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CRM Data Flow                                    │
//! │                                                                         │
//! │  GraphQL mutation (createOrder)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  crm-service handler  ──── &dyn Store ────┐                            │
//! │                                            ▼                            │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     crm-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ Store/StoreTx │    │   Database    │    │ MemoryStore  │  │   │
//! │  │   │  (store.rs)   │◄───│ (pool.rs,     │    │ (memory.rs)  │  │   │
//! │  │   │               │    │  sqlite.rs)   │    │              │  │   │
//! │  │   │ with_transact │    │ Repositories  │    │ staged txs   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                              │                                  │   │
//! │  └──────────────────────────────┼──────────────────────────────────┘   │
//! │                                 ▼                                       │
//! │                   SQLite database (migrations/sqlite)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `Store` / `StoreTx` traits and [`with_transaction`]
//! - [`pool`] - Connection pool creation and configuration
//! - [`sqlite`] - `Store` implementation for [`Database`]
//! - [`memory`] - In-memory `Store`
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - SQLite repositories (customer, product, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crm_db::{Database, DbConfig, Store};
//!
//! let db = Database::new(DbConfig::new("./crm.db")).await?;
//! let customers = db.list_customers().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use sqlite::SqliteTx;
pub use store::{with_transaction, Store, StoreTx};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
