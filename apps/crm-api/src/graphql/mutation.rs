use async_graphql::{Context, FieldResult, Json, Object, ID};
use chrono::{DateTime, Utc};
use crm_core::CustomerRecord;
use crm_service::{CreateCustomerInput, CreateOrderInput, CreateProductInput};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::graphql;
use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
};

/// Root mutation object for GraphQL.
///
/// Rejected input comes back in the payload's `message` / `errors`;
/// a GraphQL error means the store failed.
pub struct Mutation;

#[Object]
impl Mutation {
    /// Create one customer
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> FieldResult<CreateCustomerPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let input = CreateCustomerInput { name, email, phone };
        let payload = graphql(crm_service::create_customer(context.store.as_ref(), input).await)?;
        Ok(payload.into())
    }

    /// Create many customers in one transaction, skipping invalid rows
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        input: Vec<Json<Value>>,
    ) -> FieldResult<BulkCreateCustomersPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let records: Vec<CustomerRecord> = input
            .into_iter()
            .map(|Json(value)| CustomerRecord::from(value))
            .collect();
        let payload =
            graphql(crm_service::bulk_create_customers(context.store.as_ref(), records).await)?;
        Ok(payload.into())
    }

    /// Create one product
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: Decimal,
        stock: Option<i32>,
    ) -> FieldResult<CreateProductPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let input = CreateProductInput {
            name,
            price,
            stock: stock.map(i64::from),
        };
        let payload = graphql(crm_service::create_product(context.store.as_ref(), input).await)?;
        Ok(payload.into())
    }

    /// Create an order for an existing customer
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: ID,
        product_ids: Vec<ID>,
        order_date: Option<DateTime<Utc>>,
    ) -> FieldResult<CreateOrderPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let input = CreateOrderInput {
            customer_id: customer_id.0,
            product_ids: product_ids.into_iter().map(|id| id.0).collect(),
            order_date,
        };
        let payload = graphql(crm_service::create_order(context.store.as_ref(), input).await)?;
        Ok(payload.into())
    }
}
