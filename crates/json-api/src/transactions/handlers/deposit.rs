//! Deposit Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, get::TransactionResponse},
};

/// Deposit or withdrawal request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AmountRequest {
    /// Amount in minor units
    pub amount: u64,

    /// Replaying a key returns the original entry without moving money
    pub idempotency_key: Option<String>,
}

/// Deposit Handler
#[endpoint(
    tags("transactions"),
    summary = "Deposit Funds",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Funds credited"),
        (status_code = StatusCode::BAD_REQUEST, description = "Amount must be greater than zero"),
        (status_code = StatusCode::CONFLICT, description = "Wallet balance would overflow"),
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
        .deposit(principal.user_uuid, amount, idempotency_key)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(entry.into()))
}
