//! Get Transaction Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::wallet::records::LedgerEntryRecord;

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,

    /// `deposit`, `withdrawal`, `payment`, `refund`, `payout`, `transfer_in` or `transfer_out`
    pub kind: String,

    /// Amount in minor units, always positive
    pub amount: u64,

    /// `pending`, `completed` or `failed`
    pub status: String,

    /// Wallet balance right after this entry
    pub balance_after: u64,

    /// Order, withdrawal or transfer this entry belongs to
    pub reference_uuid: Option<Uuid>,

    pub counterparty_uuid: Option<Uuid>,
    pub description: String,
    pub idempotency_key: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<LedgerEntryRecord> for TransactionResponse {
    fn from(entry: LedgerEntryRecord) -> Self {
        Self {
            uuid: entry.uuid.into(),
            user_uuid: entry.user_uuid.into(),
            kind: entry.kind.to_string(),
            amount: entry.amount,
            status: entry.status.to_string(),
            balance_after: entry.balance_after,
            reference_uuid: entry.reference_uuid,
            counterparty_uuid: entry.counterparty_uuid.map(Into::into),
            description: entry.description,
            idempotency_key: entry.idempotency_key,
            created_at: entry.created_at.to_string(),
            updated_at: entry.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
}

impl From<Vec<LedgerEntryRecord>> for TransactionsResponse {
    fn from(entries: Vec<LedgerEntryRecord>) -> Self {
        Self {
            transactions: entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Transaction Handler
///
/// Users see their own entries; admins see any.
#[endpoint(
    tags("transactions"),
    summary = "Get Transaction",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ledger entry"),
        (status_code = StatusCode::NOT_FOUND, description = "Transaction not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    transaction: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let entry = state
        .app
        .wallet
        .get_transaction(transaction.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if entry.user_uuid != principal.user_uuid && !principal.is_admin() {
        return Err(StatusError::not_found().brief("Transaction not found"));
    }

    Ok(Json(entry.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stylus_app::domain::wallet::records::{LedgerEntryKind, LedgerEntryStatus};

    use crate::test_helpers::{CUSTOMER_UUID, PARTNER_UUID, TestApp, admin, customer};

    use super::{super::tests::*, *};

    fn make_service(app: TestApp, principal: stylus_app::auth::Principal) -> Service {
        app.service_as(
            principal,
            Router::with_path("transactions/{transaction}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_owner_sees_entry() -> TestResult {
        let mut app = TestApp::new();
        let entry = make_entry(
            CUSTOMER_UUID,
            LedgerEntryKind::Deposit,
            LedgerEntryStatus::Completed,
            2_000,
        );
        let uuid = entry.uuid;

        app.wallet
            .expect_get_transaction()
            .once()
            .withf(move |transaction| *transaction == uuid)
            .return_once(move |_| Ok(entry));

        let mut res = TestClient::get(format!("http://example.com/transactions/{uuid}"))
            .send(&make_service(app, customer()))
            .await;

        let body: TransactionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.kind, "deposit");
        assert_eq!(body.amount, 2_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_users_entry_returns_404() -> TestResult {
        let mut app = TestApp::new();
        let entry = make_entry(
            PARTNER_UUID,
            LedgerEntryKind::Payout,
            LedgerEntryStatus::Completed,
            900,
        );
        let uuid = entry.uuid;

        app.wallet
            .expect_get_transaction()
            .once()
            .return_once(move |_| Ok(entry));

        let res = TestClient::get(format!("http://example.com/transactions/{uuid}"))
            .send(&make_service(app, customer()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_sees_any_entry() -> TestResult {
        let mut app = TestApp::new();
        let entry = make_entry(
            PARTNER_UUID,
            LedgerEntryKind::Payout,
            LedgerEntryStatus::Completed,
            900,
        );
        let uuid = entry.uuid;

        app.wallet
            .expect_get_transaction()
            .once()
            .return_once(move |_| Ok(entry));

        let res = TestClient::get(format!("http://example.com/transactions/{uuid}"))
            .send(&make_service(app, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
