//! # crm-core: Pure Domain Logic for the CRM Service
//!
//! This crate holds the entities, money arithmetic and validation rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CRM Architecture                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/crm-api (GraphQL over HTTP)                │   │
//! │  │   createCustomer, bulkCreateCustomers, createProduct, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 crm-service (mutation handlers)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crm-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  record   │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │ Customer  │  │  email    │  │   │
//! │  │   │ Product   │  │  (cents)  │  │  Record   │  │  phone    │  │   │
//! │  │   │ Order     │  │           │  │           │  │  price    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 crm-db (Entity Store)                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Customer, Product, Order) and their creation inputs
//! - [`money`] - Money type with integer arithmetic
//! - [`record`] - Loosely-typed bulk input record
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use crm_core::money::Money;
//! use crm_core::validation::{validate_email, validate_phone};
//!
//! assert!(validate_email("alice@example.com").is_ok());
//! assert!(validate_phone(Some("+1 555 0100")).is_ok());
//!
//! let total = Money::checked_sum([Money::from_cents(99_999), Money::from_cents(49_999)]);
//! assert_eq!(total.map(|t| t.to_string()).as_deref(), Some("1499.98"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod record;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ErrorCategory, ValidationError};
pub use money::Money;
pub use record::CustomerRecord;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an email address.
///
/// ## Business Reason
/// 64 characters of local part + `@` + 255 characters of domain.
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Default stock for a product created without an explicit stock level.
pub const DEFAULT_STOCK: i64 = 0;
