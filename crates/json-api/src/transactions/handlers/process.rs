//! Process Withdrawal Handler

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

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, get::TransactionResponse},
};

/// Process Withdrawal Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProcessWithdrawalRequest {
    /// `true` completes the withdrawal; `false` fails it and refunds the user
    pub approve: bool,
}

/// Process Withdrawal Handler
///
/// Admin only.
#[endpoint(
    tags("transactions"),
    summary = "Process Withdrawal",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Withdrawal processed"),
        (status_code = StatusCode::NOT_FOUND, description = "Withdrawal not found"),
        (status_code = StatusCode::CONFLICT, description = "Already processed"),
    ),
)]
pub(crate) async fn handler(
    transaction: PathParam<Uuid>,
    json: JsonBody<ProcessWithdrawalRequest>,
    depot: &mut Depot,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let approve = json.into_inner().approve;

    let entry = state
        .app
        .wallet
        .process_withdrawal(transaction.into_inner().into(), approve)
        .await
        .map_err(into_status_error)?;

    Ok(Json(entry.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stylus_app::domain::wallet::{
        WalletServiceError,
        records::{LedgerEntryKind, LedgerEntryStatus, TransactionUuid},
    };

    use crate::test_helpers::{PARTNER_UUID, TestApp, admin};

    use super::{super::tests::*, *};

    fn make_service(app: TestApp) -> Service {
        app.service_as(
            admin(),
            Router::with_path("transactions/{transaction}/process").put(handler),
        )
    }

    #[tokio::test]
    async fn test_reject_fails_the_withdrawal() -> TestResult {
        let mut app = TestApp::new();
        let uuid = TransactionUuid::new();

        app.wallet
            .expect_process_withdrawal()
            .once()
            .withf(move |transaction, approve| *transaction == uuid && !*approve)
            .return_once(|_, _| {
                Ok(make_entry(
                    PARTNER_UUID,
                    LedgerEntryKind::Withdrawal,
                    LedgerEntryStatus::Failed,
                    3_000,
                ))
            });

        let mut res = TestClient::put(format!("http://example.com/transactions/{uuid}/process"))
            .json(&json!({ "approve": false }))
            .send(&make_service(app))
            .await;

        let body: TransactionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "failed");

        Ok(())
    }

    #[tokio::test]
    async fn test_processed_twice_returns_409() -> TestResult {
        let mut app = TestApp::new();

        app.wallet
            .expect_process_withdrawal()
            .once()
            .return_once(|_, _| Err(WalletServiceError::InvalidStatus));

        let res = TestClient::put(format!(
            "http://example.com/transactions/{}/process",
            TransactionUuid::new()
        ))
        .json(&json!({ "approve": true }))
        .send(&make_service(app))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
