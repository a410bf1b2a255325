//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrdersResponse},
    state::State,
};

/// Order Index Handler
///
/// Orders placed by the caller, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stylus_app::domain::orders::records::OrderUuid;

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer};

    use super::{super::tests::*, *};

    #[tokio::test]
    async fn test_lists_callers_orders() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_list_orders()
            .once()
            .withf(|buyer| *buyer == CUSTOMER_UUID)
            .return_once(|_| Ok(vec![make_order(OrderUuid::new()), make_order(OrderUuid::new())]));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&app.service_as(customer(), Router::with_path("orders").get(handler)))
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.orders.len(), 2);

        Ok(())
    }
}
