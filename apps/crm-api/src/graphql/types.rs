//! Read projections: how stored entities appear to GraphQL callers.
//!
//! ```text
//! crm_core::Customer → Customer { id, name, email, phone }
//! crm_core::Product  → Product  { id, name, price, stock }
//! crm_core::Order    → Order    { id, customer, products, totalAmount, orderDate }
//! ```

use async_graphql::{Context, ErrorExtensions, Object, SimpleObject, ID};
use chrono::{DateTime, Utc};
use crm_core::{
    Customer as DomainCustomer, Order as DomainOrder, OrderDetails, Product as DomainProduct,
};
use crm_service::{BulkCustomersPayload, CustomerPayload, OrderPayload, ProductPayload};
use rust_decimal::Decimal;

use crate::error::{graphql, ApiError};
use crate::graphql::schema::GraphQLContext;

// =============================================================================
// Entities
// =============================================================================

/// GraphQL representation of a Customer
#[derive(Clone)]
pub struct Customer {
    pub inner: DomainCustomer,
}

impl From<DomainCustomer> for Customer {
    fn from(customer: DomainCustomer) -> Self {
        Self { inner: customer }
    }
}

#[Object]
impl Customer {
    async fn id(&self) -> ID {
        ID(self.inner.id.clone())
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Unique across all customers
    async fn email(&self) -> &str {
        &self.inner.email
    }

    async fn phone(&self) -> Option<&str> {
        self.inner.phone.as_deref()
    }
}

/// GraphQL representation of a Product
#[derive(Clone)]
pub struct Product {
    pub inner: DomainProduct,
}

impl From<DomainProduct> for Product {
    fn from(product: DomainProduct) -> Self {
        Self { inner: product }
    }
}

#[Object]
impl Product {
    async fn id(&self) -> ID {
        ID(self.inner.id.clone())
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Unit price, always positive
    async fn price(&self) -> Decimal {
        self.inner.price().to_decimal()
    }

    async fn stock(&self) -> i64 {
        self.inner.stock
    }
}

/// GraphQL representation of an Order.
///
/// Customer and products are loaded from the store on demand unless they
/// were already resolved when the order was created.
#[derive(Clone)]
pub struct Order {
    pub inner: DomainOrder,
    customer: Option<DomainCustomer>,
    products: Option<Vec<DomainProduct>>,
}

impl From<DomainOrder> for Order {
    fn from(order: DomainOrder) -> Self {
        Self {
            inner: order,
            customer: None,
            products: None,
        }
    }
}

impl From<OrderDetails> for Order {
    fn from(details: OrderDetails) -> Self {
        Self {
            inner: details.order,
            customer: Some(details.customer),
            products: Some(details.products),
        }
    }
}

#[Object]
impl Order {
    async fn id(&self) -> ID {
        ID(self.inner.id.clone())
    }

    /// The customer who placed the order
    async fn customer(&self, ctx: &Context<'_>) -> async_graphql::Result<Customer> {
        if let Some(customer) = &self.customer {
            return Ok(customer.clone().into());
        }

        let context = ctx.data::<GraphQLContext>()?;
        graphql(context.store.customer_by_id(&self.inner.customer_id).await)?
            .map(Customer::from)
            .ok_or_else(|| {
                ApiError::internal(format!("Order {} references a missing customer", self.inner.id))
                    .extend()
            })
    }

    /// The ordered products
    async fn products(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Product>> {
        if let Some(products) = &self.products {
            return Ok(products.iter().cloned().map(Product::from).collect());
        }

        let context = ctx.data::<GraphQLContext>()?;
        let products = graphql(context.store.order_products(&self.inner.id).await)?;
        Ok(products.into_iter().map(Product::from).collect())
    }

    /// Sum of the product prices at creation time
    async fn total_amount(&self) -> Decimal {
        self.inner.total_amount().to_decimal()
    }

    /// Date supplied by the caller, if any
    async fn order_date(&self) -> Option<DateTime<Utc>> {
        self.inner.order_date
    }
}

// =============================================================================
// Mutation Payloads
// =============================================================================

#[derive(SimpleObject)]
pub struct CreateCustomerPayload {
    pub customer: Option<Customer>,
    pub message: String,
}

impl From<CustomerPayload> for CreateCustomerPayload {
    fn from(payload: CustomerPayload) -> Self {
        Self {
            customer: payload.customer.map(Customer::from),
            message: payload.message,
        }
    }
}

#[derive(SimpleObject)]
pub struct BulkCreateCustomersPayload {
    /// Customers committed by this call, in input order
    pub customers: Vec<Customer>,
    /// One entry per skipped row, in input order
    pub errors: Vec<String>,
}

impl From<BulkCustomersPayload> for BulkCreateCustomersPayload {
    fn from(payload: BulkCustomersPayload) -> Self {
        Self {
            customers: payload.customers.into_iter().map(Customer::from).collect(),
            errors: payload.errors,
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateProductPayload {
    pub product: Option<Product>,
    pub message: String,
}

impl From<ProductPayload> for CreateProductPayload {
    fn from(payload: ProductPayload) -> Self {
        Self {
            product: payload.product.map(Product::from),
            message: payload.message,
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateOrderPayload {
    pub order: Option<Order>,
    pub message: String,
}

impl From<OrderPayload> for CreateOrderPayload {
    fn from(payload: OrderPayload) -> Self {
        Self {
            order: payload.order.map(Order::from),
            message: payload.message,
        }
    }
}
