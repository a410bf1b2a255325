//! Wallet Balance Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BalanceResponse {
    /// Wallet balance in minor units
    pub balance: u64,
}

/// Wallet Balance Handler
#[endpoint(
    tags("transactions"),
    summary = "Get Wallet Balance",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BalanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let balance = state
        .app
        .wallet
        .balance(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BalanceResponse { balance }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer};

    use super::*;

    #[tokio::test]
    async fn test_balance() -> TestResult {
        let mut app = TestApp::new();

        app.wallet
            .expect_balance()
            .once()
            .withf(|user| *user == CUSTOMER_UUID)
            .return_once(|_| Ok(12_345));

        let mut res = TestClient::get("http://example.com/transactions/balance")
            .send(&app.service_as(
                customer(),
                Router::with_path("transactions/balance").get(handler),
            ))
            .await;

        let body: BalanceResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.balance, 12_345);

        Ok(())
    }
}
