//! Transaction Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, get::TransactionsResponse},
};

/// Transaction Index Handler
///
/// The caller's own ledger, newest first.
#[endpoint(
    tags("transactions"),
    summary = "List My Transactions",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let entries = state
        .app
        .wallet
        .list_transactions(principal.user_uuid, (limit, offset).into_page())
        .await
        .map_err(into_status_error)?;

    Ok(Json(entries.into()))
}
