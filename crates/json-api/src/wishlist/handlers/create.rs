//! Add to Wishlist Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    wishlist::{errors::into_status_error, index::WishlistItemResponse},
};

/// Add to Wishlist Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToWishlistRequest {
    pub product_uuid: Uuid,
}

/// Add to Wishlist Handler
#[endpoint(
    tags("wishlist"),
    summary = "Add to Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product saved"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product already saved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToWishlistRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WishlistItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let item = state
        .app
        .wishlist
        .add(principal.user_uuid, json.into_inner().product_uuid.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stylus_app::domain::{
        products::records::ProductUuid,
        wishlist::{
            WishlistServiceError,
            records::{WishlistItemRecord, WishlistItemUuid},
        },
    };

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service_as(customer(), Router::with_path("wishlist").post(handler))
    }

    #[tokio::test]
    async fn test_add_returns_201() -> TestResult {
        let mut app = TestApp::new();
        let product = ProductUuid::new();

        app.wishlist
            .expect_add()
            .once()
            .withf(move |user, p| *user == CUSTOMER_UUID && *p == product)
            .return_once(|user, product| {
                Ok(WishlistItemRecord {
                    uuid: WishlistItemUuid::new(),
                    user_uuid: user,
                    product_uuid: product,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/wishlist")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(app))
            .await;

        let body: WishlistItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.product_uuid, product.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_returns_409() -> TestResult {
        let mut app = TestApp::new();

        app.wishlist
            .expect_add()
            .once()
            .return_once(|_, _| Err(WishlistServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/wishlist")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid() }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut app = TestApp::new();

        app.wishlist
            .expect_add()
            .once()
            .return_once(|_, _| Err(WishlistServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/wishlist")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid() }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
