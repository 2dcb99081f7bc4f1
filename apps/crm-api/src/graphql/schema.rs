use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};
use crm_db::Store;

use crate::graphql::mutation::Mutation;
use crate::graphql::query::Query;

/// GraphQL context containing shared application state
pub struct GraphQLContext {
    pub store: Arc<dyn Store>,
}

/// The complete GraphQL schema
pub type CrmSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create a new GraphQL schema over the given store
pub fn create_schema(store: Arc<dyn Store>) -> CrmSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(GraphQLContext { store })
        .finish()
}
