//! All Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrdersResponse},
    state::State,
};

/// All Orders Handler
///
/// Every order on the platform, newest first. Admin only.
#[endpoint(
    tags("orders"),
    summary = "List All Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_all_orders((limit, offset).into_page())
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
