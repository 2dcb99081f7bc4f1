//! # CreateProduct
//!
//! `price` is checked before `stock`; the first failure wins.

use crm_core::validation::{parse_price, validate_stock};
use crm_core::{NewProduct, DEFAULT_STOCK};
use crm_db::{DbResult, Store};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::payload::ProductPayload;

/// Input of the createProduct mutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub price: Decimal,
    /// Defaults to 0 when absent.
    pub stock: Option<i64>,
}

/// Creates one product.
pub async fn create_product(
    store: &dyn Store,
    input: CreateProductInput,
) -> DbResult<ProductPayload> {
    let stock = input.stock.unwrap_or(DEFAULT_STOCK);

    let checked = parse_price(input.price).and_then(|price| {
        validate_stock(stock)?;
        Ok(price)
    });

    let price = match checked {
        Ok(price) => price,
        Err(reason) => {
            debug!(category = ?reason.category(), %reason, "Product rejected");
            return Ok(ProductPayload::rejected(reason));
        }
    };

    let product = NewProduct {
        name: input.name,
        price,
        stock,
    }
    .into_product();
    store.insert_product(&product).await?;

    info!(id = %product.id, price = %product.price(), stock, "Product created");
    Ok(ProductPayload::created(product))
}

// =============================================================================
// Unit Tests
// =============================================================================
