//! Partner Order Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stylus_app::domain::orders::{data::PartnerItemFilter, status::OrderItemStatus};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderItemResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemsResponse {
    pub items: Vec<OrderItemResponse>,
}

/// Partner Order Items Handler
///
/// Order items for products the caller listed, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Incoming Order Items",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrderItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let filter = PartnerItemFilter {
        status: status
            .into_inner()
            .map(|status| status.parse::<OrderItemStatus>())
            .transpose()
            .or_400("unknown order item status")?,
        page: (limit, offset).into_page(),
    };

    let items = state
        .app
        .orders
        .list_partner_items(principal.user_uuid, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderItemsResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stylus_app::domain::orders::records::OrderUuid;

    use crate::test_helpers::{PARTNER_UUID, TestApp, partner};

    use super::{super::tests::*, *};

    fn make_service(app: TestApp) -> Service {
        app.service_as(
            partner(),
            Router::with_path("orders/partner/items").get(handler),
        )
    }

    #[tokio::test]
    async fn test_status_filter_is_forwarded() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_list_partner_items()
            .once()
            .withf(|partner, filter| {
                *partner == PARTNER_UUID && filter.status == Some(OrderItemStatus::Accepted)
            })
            .return_once(|_, _| {
                Ok(vec![make_item(
                    OrderUuid::new(),
                    OrderItemStatus::Accepted,
                )])
            });

        let mut res = TestClient::get("http://example.com/orders/partner/items?status=accepted")
            .send(&make_service(app))
            .await;

        let body: OrderItemsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.orders.expect_list_partner_items().never();

        let res = TestClient::get("http://example.com/orders/partner/items?status=lost")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
