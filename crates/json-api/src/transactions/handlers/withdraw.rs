//! Withdrawal Request Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    state::State,
    transactions::{
        deposit::AmountRequest, errors::into_status_error, get::TransactionResponse,
    },
};

/// Withdrawal Request Handler
///
/// Debits the wallet now and leaves a pending entry for an admin to process.
#[endpoint(
    tags("transactions"),
    summary = "Request Withdrawal",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Withdrawal pending review"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid amount or insufficient funds"),
        (status_code = StatusCode::FORBIDDEN, description = "Account must be verified"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AmountRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let AmountRequest {
        amount,
        idempotency_key,
    } = json.into_inner();

    let entry = state
        .app
        .wallet
        .request_withdrawal(principal.user_uuid, amount, idempotency_key)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(entry.into()))
}
