//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::{
    carts::records::{Cart, CartItemRecord, CartLine},
    products::records::ProductRecord,
};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// The product behind a cart or order line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummary {
    pub uuid: Uuid,
    pub owner_uuid: Uuid,
    pub name: String,
    pub brand: String,
    pub images: Vec<String>,
    pub rental_price_per_day: Option<u64>,
    pub sale_price: u64,

    /// `active` or `sold`
    pub status: String,
}

impl From<ProductRecord> for ProductSummary {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into(),
            owner_uuid: product.owner_uuid.into(),
            name: product.name,
            brand: product.brand,
            images: product.images,
            rental_price_per_day: product.rental_price_per_day,
            sale_price: product.sale_price,
            status: product.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,

    /// `rental` or `purchase`
    pub kind: String,

    pub size: Option<String>,

    /// First rental day, inclusive
    pub rental_start: Option<String>,

    /// Last rental day, inclusive
    pub rental_end: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            kind: item.kind.to_string(),
            size: item.size,
            rental_start: item.rental_window.map(|window| window.start().to_string()),
            rental_end: item.rental_window.map(|window| window.end().to_string()),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub item: CartItemResponse,
    pub product: ProductSummary,

    /// Current price quote; absent when the product can no longer be ordered this way
    pub price: Option<u64>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            item: line.item.into(),
            product: line.product.into(),
            price: line.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartLineResponse>,

    /// Sum of the priced lines in minor units
    pub subtotal: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.lines.into_iter().map(Into::into).collect(),
            subtotal: cart.subtotal,
        }
    }
}

/// Get Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart with price quotes"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
