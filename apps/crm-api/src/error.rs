//! # API Error Type
//!
//! Errors surfaced as GraphQL errors.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CRM API                            │
//! │                                                                         │
//! │  Validation failure (bad email, duplicate, unknown id, ...)            │
//! │       └──► payload.message / payload.errors   (data, not an error)     │
//! │                                                                         │
//! │  Store fault (DbError)                                                 │
//! │       └──► ApiError ──► async_graphql::Error                           │
//! │                         {                                               │
//! │                           "message": "Database operation failed",      │
//! │                           "extensions": { "code": "DATABASE_ERROR" }   │
//! │                         }                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details are logged, never sent to the caller.

use async_graphql::ErrorExtensions;
use crm_db::DbError;
use serde::Serialize;

/// API error returned from resolvers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes exposed in the GraphQL `extensions.code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected by a store constraint
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Store is temporarily unable to serve the request
    Unavailable,

    /// Internal server error
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Unavailable => "UNAVAILABLE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, .. } => {
                ApiError::new(ErrorCode::ValidationError, format!("{} already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::CheckViolation(message) => {
                tracing::error!("Constraint violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Value out of range")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::Unavailable, "Database connection failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::Unavailable, "Database pool exhausted")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code.as_str();
        async_graphql::Error::new(self.message.clone()).extend_with(|_, e| e.set("code", code))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Maps a store result into a GraphQL field result.
pub fn graphql<T>(result: Result<T, DbError>) -> async_graphql::Result<T> {
    result.map_err(|err| ApiError::from(err).extend())
}
