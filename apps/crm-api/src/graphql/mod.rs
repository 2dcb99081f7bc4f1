//! GraphQL schema for the CRM service.
//!
//! ```text
//! Query                      Mutation
//! ├── customers / customer   ├── createCustomer
//! ├── products  / product    ├── bulkCreateCustomers
//! └── orders    / order      ├── createProduct
//!                            └── createOrder
//! ```

pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use schema::{create_schema, CrmSchema, GraphQLContext};
