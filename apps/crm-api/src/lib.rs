//! # CRM API
//!
//! GraphQL over HTTP for customers, products and orders.
//!
//! ## Module Organization
//! ```text
//! crm_api
//! ├── config   - Layered settings (defaults, crm.toml, CRM_* env)
//! ├── error    - Store faults as GraphQL errors
//! ├── graphql  - Schema, resolvers and payload types
//! └── server   - axum router and graceful shutdown
//! ```

pub mod config;
pub mod error;
pub mod graphql;
pub mod server;

pub use config::{ApiConfig, ConfigError, StoreBackend};
pub use error::{ApiError, ErrorCode};
pub use graphql::{create_schema, CrmSchema, GraphQLContext};
pub use server::{create_router, serve};
