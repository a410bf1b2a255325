//! Update Order Item Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::orders::status::OrderItemStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderItemResponse},
    state::State,
};

/// Update Order Item Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// Target status, e.g. `accepted` or `shipped`
    pub status: String,
}

/// Update Order Item Status Handler
///
/// Moves an item along its lifecycle. Refunds and payouts happen in the same step.
#[endpoint(
    tags("orders"),
    summary = "Update Order Item Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not allowed to make this change"),
        (status_code = StatusCode::CONFLICT, description = "Illegal transition"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_item_status",
    skip(item, json, depot),
    fields(
        item_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let item = item.into_inner();

    let status = json
        .into_inner()
        .status
        .parse::<OrderItemStatus>()
        .or_400("unknown order item status")?;

    let span = tracing::Span::current();

    span.record("item_uuid", tracing::field::display(item));
    span.record("status", tracing::field::display(status));

    let updated = state
        .app
        .orders
        .update_item_status(principal, item.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
