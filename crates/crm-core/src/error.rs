//! # Error Types
//!
//! Domain-specific error types for crm-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crm-core errors (this file)                                           │
//! │  └── ValidationError  - Input rejected by a business rule              │
//! │                         (reported inside the response payload)         │
//! │                                                                         │
//! │  crm-db errors (separate crate)                                        │
//! │  └── DbError          - Store faults (fail the whole call)             │
//! │                                                                         │
//! │  crm-api errors (in app)                                               │
//! │  └── ApiError         - What GraphQL clients see for store faults      │
//! │                                                                         │
//! │  ValidationError → payload.message / payload.errors                    │
//! │  DbError → ApiError → GraphQL `errors`                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `Display` text of every variant IS the user-facing message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures.
///
/// Every variant renders to the exact message callers receive in the
/// `message` field of a mutation payload. Row-level bulk errors are built
/// from these by `crm-service`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Email fails the syntax check.
    #[error("Invalid email format")]
    InvalidEmail,

    /// Another customer already uses this email.
    #[error("Email already exists")]
    DuplicateEmail,

    /// Phone is neither `+`-prefixed nor digits-and-hyphens.
    #[error("Invalid phone format")]
    InvalidPhone,

    /// Customer name is missing or blank.
    #[error("Name is required")]
    NameRequired,

    /// Price is zero or negative.
    #[error("Price must be positive")]
    PriceNotPositive,

    /// Price does not fit the money representation.
    #[error("Price is out of range")]
    PriceOutOfRange,

    /// The summed order total does not fit the money representation.
    #[error("Order total is out of range")]
    TotalOutOfRange,

    /// Stock is below zero.
    #[error("Stock cannot be negative")]
    NegativeStock,

    /// Order references a customer that does not exist.
    #[error("Invalid customer ID {id}")]
    InvalidCustomer { id: String },

    /// None of the requested product ids resolved.
    #[error("No valid products found")]
    NoValidProducts,

    /// Fewer products resolved than ids were requested.
    ///
    /// ## When This Occurs
    /// - At least one id does not exist
    /// - The same id is requested twice (matches are a set, so the
    ///   count comes up short)
    #[error("Some product IDs are invalid")]
    InvalidProductIds,
}

/// Broad classification of a [`ValidationError`].
///
/// ## Taxonomy
/// ```text
/// Format      → email / phone syntax
/// Uniqueness  → duplicate email
/// Range       → price ≤ 0, order total overflow, stock < 0
/// Reference   → unknown customer / product ids
/// EmptyInput  → no product resolved
/// Required    → blank name
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Format,
    Uniqueness,
    Range,
    Reference,
    EmptyInput,
    Required,
}

impl ValidationError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationError::InvalidEmail | ValidationError::InvalidPhone => ErrorCategory::Format,
            ValidationError::DuplicateEmail => ErrorCategory::Uniqueness,
            ValidationError::PriceNotPositive
            | ValidationError::PriceOutOfRange
            | ValidationError::TotalOutOfRange
            | ValidationError::NegativeStock => ErrorCategory::Range,
            ValidationError::InvalidCustomer { .. } | ValidationError::InvalidProductIds => {
                ErrorCategory::Reference
            }
            ValidationError::NoValidProducts => ErrorCategory::EmptyInput,
            ValidationError::NameRequired => ErrorCategory::Required,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
