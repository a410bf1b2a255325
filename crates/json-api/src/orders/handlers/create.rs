//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stylus_app::domain::orders::data::Checkout;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        get::{OrderResponse, ShippingAddressBody},
    },
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub shipping_address: ShippingAddressBody,
}

/// Checkout Handler
///
/// Turns the caller's cart into an order and pays for it from their wallet.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, bad address or insufficient funds"),
        (status_code = StatusCode::FORBIDDEN, description = "Account must be verified"),
        (status_code = StatusCode::CONFLICT, description = "A product is no longer available"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .checkout(
            principal.user_uuid,
            Checkout {
                shipping_address: json.into_inner().shipping_address.into(),
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/orders/{}", order.order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use stylus_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer};

    use super::{super::tests::*, *};

    fn make_service(app: TestApp) -> Service {
        app.service_as(customer(), Router::with_path("orders").post(handler))
    }

    fn address() -> Value {
        json!({
            "shipping_address": {
                "line1": "1 Bond Street",
                "city": "London",
                "postal_code": "W1S 1AA",
                "country": "GB",
            }
        })
    }

    #[tokio::test]
    async fn test_checkout_returns_201() -> TestResult {
        let mut app = TestApp::new();
        let uuid = OrderUuid::new();

        app.orders
            .expect_checkout()
            .once()
            .withf(|buyer, checkout| {
                *buyer == CUSTOMER_UUID
                    && checkout.shipping_address.city == "London"
                    && checkout.shipping_address.line2.is_none()
            })
            .return_once(move |_, _| Ok(make_order(uuid)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&address())
            .send(&make_service(app))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.total, 4_500);
        assert_eq!(
            res.headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some(format!("/api/orders/{uuid}").as_str())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/orders")
            .json(&address())
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_booked_rental_returns_409() -> TestResult {
        let mut app = TestApp::new();

        app.orders
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Unavailable));

        let res = TestClient::post("http://example.com/orders")
            .json(&address())
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_address_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.orders.expect_checkout().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({}))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
