use async_graphql::{Context, FieldResult, Object, ID};

use crate::error::graphql;
use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{Customer, Order, Product};

/// Root query object for GraphQL
pub struct Query;

#[Object]
impl Query {
    /// All customers, oldest first
    async fn customers(&self, ctx: &Context<'_>) -> FieldResult<Vec<Customer>> {
        let context = ctx.data::<GraphQLContext>()?;
        let customers = graphql(context.store.list_customers().await)?;
        Ok(customers.into_iter().map(Customer::from).collect())
    }

    /// Get a customer by ID
    async fn customer(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<Customer>> {
        let context = ctx.data::<GraphQLContext>()?;
        let customer = graphql(context.store.customer_by_id(&id).await)?;
        Ok(customer.map(Customer::from))
    }

    /// All products, oldest first
    async fn products(&self, ctx: &Context<'_>) -> FieldResult<Vec<Product>> {
        let context = ctx.data::<GraphQLContext>()?;
        let products = graphql(context.store.list_products().await)?;
        Ok(products.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID
    async fn product(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<Product>> {
        let context = ctx.data::<GraphQLContext>()?;
        let product = graphql(context.store.product_by_id(&id).await)?;
        Ok(product.map(Product::from))
    }

    /// All orders, oldest first
    async fn orders(&self, ctx: &Context<'_>) -> FieldResult<Vec<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let orders = graphql(context.store.list_orders().await)?;
        Ok(orders.into_iter().map(Order::from).collect())
    }

    /// Get an order by ID
    async fn order(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let order = graphql(context.store.order_by_id(&id).await)?;
        Ok(order.map(Order::from))
    }
}
