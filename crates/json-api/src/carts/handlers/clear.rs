//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart emptied"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .carts
        .clear_cart(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer};

    use super::*;

    #[tokio::test]
    async fn test_clear_cart_returns_204() -> TestResult {
        let mut app = TestApp::new();

        app.carts
            .expect_clear_cart()
            .once()
            .withf(|user| *user == CUSTOMER_UUID)
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/cart")
            .send(&app.service_as(customer(), Router::with_path("cart").delete(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
