//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::orders::records::{Order, OrderItemRecord, ShippingAddress};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressBody {
    pub line1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        Self {
            line1: body.line1,
            line2: body.line2,
            city: body.city,
            postal_code: body.postal_code,
            country: body.country,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        Self {
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,
    pub product_uuid: Uuid,

    /// The partner who listed the product
    pub partner_uuid: Uuid,

    /// `rental` or `purchase`
    pub kind: String,

    pub size: Option<String>,
    pub rental_start: Option<String>,
    pub rental_end: Option<String>,
    pub rental_days: Option<u32>,

    /// Price paid in minor units
    pub price: u64,

    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            order_uuid: item.order_uuid.into(),
            product_uuid: item.product_uuid.into(),
            partner_uuid: item.partner_uuid.into(),
            kind: item.kind.to_string(),
            size: item.size,
            rental_start: item.rental_window.map(|window| window.start().to_string()),
            rental_end: item.rental_window.map(|window| window.end().to_string()),
            rental_days: item.rental_days,
            price: item.price,
            status: item.status.to_string(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,

    /// Amount charged in minor units
    pub total: u64,

    /// `pending`, `in_progress`, `completed` or `cancelled`, derived from the items
    pub status: String,

    pub shipping_address: ShippingAddressBody,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let status = order.status().to_string();
        let Order { order, items } = order;

        Self {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            total: order.total,
            status,
            shipping_address: order.shipping_address.into(),
            items: items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<Order>> for OrdersResponse {
    fn from(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
///
/// Visible to the buyer, to partners with an item in the order and to admins.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order with items"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .get_order(principal, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
