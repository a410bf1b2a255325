//! Update Cart Item Handler

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

use stylus_app::domain::carts::data::CartItemUpdate;

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse, items::rental_window},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
///
/// Omitted fields are left unchanged. Rental dates must be sent as a pair.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub size: Option<String>,
    pub rental_start: Option<String>,
    pub rental_end: Option<String>,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let update = CartItemUpdate {
        rental_window: rental_window(
            request.rental_start.as_deref(),
            request.rental_end.as_deref(),
        )?,
        size: request.size,
    };

    let item = state
        .app
        .carts
        .update_item(principal.user_uuid, item.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stylus_app::domain::{
        carts::{CartsServiceError, records::CartItemUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer, make_cart_item};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service_as(customer(), Router::with_path("cart/items/{item}").put(handler))
    }

    #[tokio::test]
    async fn test_update_size_only() -> TestResult {
        let mut app = TestApp::new();
        let uuid = CartItemUuid::new();

        app.carts
            .expect_update_item()
            .once()
            .withf(move |user, item, update| {
                *user == CUSTOMER_UUID
                    && *item == uuid
                    && *update
                        == CartItemUpdate {
                            size: Some("L".to_string()),
                            rental_window: None,
                        }
            })
            .return_once(|_, item, _| {
                let mut record = make_cart_item(item, ProductUuid::new());

                record.size = Some("L".to_string());

                Ok(record)
            });

        let mut res = TestClient::put(format!("http://example.com/cart/items/{uuid}"))
            .json(&json!({ "size": "L" }))
            .send(&make_service(app))
            .await;

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.size.as_deref(), Some("L"));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_someone_elses_item_returns_404() -> TestResult {
        let mut app = TestApp::new();

        app.carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/cart/items/{}", CartItemUuid::new()))
            .json(&json!({ "rental_start": "2030-08-01", "rental_end": "2030-08-02" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_rental_dates_on_purchase_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| {
                Err(CartsServiceError::InvalidItem(
                    "purchases do not take rental dates",
                ))
            });

        let res = TestClient::put(format!("http://example.com/cart/items/{}", CartItemUuid::new()))
            .json(&json!({ "rental_start": "2030-08-01", "rental_end": "2030-08-02" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
