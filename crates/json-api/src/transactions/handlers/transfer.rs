//! Transfer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::wallet::data::Transfer;

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, get::TransactionResponse},
};

/// Transfer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransferRequest {
    pub recipient_uuid: Uuid,

    /// Amount in minor units
    pub amount: u64,

    pub note: Option<String>,
    pub idempotency_key: Option<String>,
}

impl From<TransferRequest> for Transfer {
    fn from(request: TransferRequest) -> Self {
        Transfer {
            recipient: request.recipient_uuid.into(),
            amount: request.amount,
            note: request.note,
            idempotency_key: request.idempotency_key,
        }
    }
}

/// Transfer Handler
///
/// Moves funds to another user's wallet and returns the sender's entry.
#[endpoint(
    tags("transactions"),
    summary = "Transfer Funds",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Transfer posted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid amount, note or recipient"),
        (status_code = StatusCode::FORBIDDEN, description = "Account must be verified"),
        (status_code = StatusCode::NOT_FOUND, description = "Recipient not found"),
        (status_code = StatusCode::CONFLICT, description = "Idempotency key reused"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TransferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let entry = state
        .app
        .wallet
        .transfer_funds(principal.user_uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(entry.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stylus_app::domain::wallet::{
        WalletServiceError,
        records::{LedgerEntryKind, LedgerEntryStatus},
    };

    use crate::test_helpers::{CUSTOMER_UUID, PARTNER_UUID, TestApp, customer};

    use super::{super::tests::*, *};

    fn make_service(app: TestApp) -> Service {
        app.service_as(
            customer(),
            Router::with_path("transactions/transfer").post(handler),
        )
    }

    #[tokio::test]
    async fn test_transfer_returns_sender_entry() -> TestResult {
        let mut app = TestApp::new();

        app.wallet
            .expect_transfer_funds()
            .once()
            .withf(|sender, transfer| {
                *sender == CUSTOMER_UUID
                    && *transfer
                        == Transfer {
                            recipient: PARTNER_UUID,
                            amount: 750,
                            note: Some("dry cleaning".to_string()),
                            idempotency_key: None,
                        }
            })
            .return_once(|sender, transfer| {
                let mut entry = make_entry(
                    sender,
                    LedgerEntryKind::TransferOut,
                    LedgerEntryStatus::Completed,
                    transfer.amount,
                );

                entry.counterparty_uuid = Some(transfer.recipient);

                Ok(entry)
            });

        let mut res = TestClient::post("http://example.com/transactions/transfer")
            .json(&json!({
                "recipient_uuid": PARTNER_UUID.into_uuid(),
                "amount": 750,
                "note": "dry cleaning",
            }))
            .send(&make_service(app))
            .await;

        let body: TransactionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.kind, "transfer_out");
        assert_eq!(body.counterparty_uuid, Some(PARTNER_UUID.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_self_transfer_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.wallet
            .expect_transfer_funds()
            .once()
            .return_once(|_, _| Err(WalletServiceError::SelfTransfer));

        let res = TestClient::post("http://example.com/transactions/transfer")
            .json(&json!({ "recipient_uuid": CUSTOMER_UUID.into_uuid(), "amount": 10 }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_recipient_returns_404() -> TestResult {
        let mut app = TestApp::new();

        app.wallet
            .expect_transfer_funds()
            .once()
            .return_once(|_, _| Err(WalletServiceError::RecipientNotFound));

        let res = TestClient::post("http://example.com/transactions/transfer")
            .json(&json!({ "recipient_uuid": Uuid::now_v7(), "amount": 10 }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
