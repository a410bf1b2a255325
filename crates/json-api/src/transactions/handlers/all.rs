//! All Transactions Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use stylus_app::domain::wallet::{
    data::TransactionFilter,
    records::{LedgerEntryKind, LedgerEntryStatus},
};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, get::TransactionsResponse},
};

/// All Transactions Handler
///
/// Every ledger entry on the platform. Admin only.
#[endpoint(
    tags("transactions"),
    summary = "List All Transactions",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: QueryParam<Uuid, false>,
    kind: QueryParam<String, false>,
    status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = TransactionFilter {
        user: user.into_inner().map(Into::into),
        kind: kind
            .into_inner()
            .map(|kind| kind.parse::<LedgerEntryKind>())
            .transpose()
            .or_400("unknown transaction kind")?,
        status: status
            .into_inner()
            .map(|status| status.parse::<LedgerEntryStatus>())
            .transpose()
            .or_400("unknown transaction status")?,
        page: (limit, offset).into_page(),
    };

    let entries = state
        .app
        .wallet
        .list_all_transactions(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(entries.into()))
}
