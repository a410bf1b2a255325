//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::reviews::{data::NewReview, records::ReviewUuid};

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, product::ReviewResponse},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    pub product_uuid: Uuid,

    /// 1 to 5
    pub rating: u8,

    #[serde(default)]
    pub comment: String,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview {
            uuid: ReviewUuid::new(),
            product_uuid: request.product_uuid.into(),
            rating: request.rating,
            comment: request.comment,
        }
    }
}

/// Create Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Review a Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid rating or comment"),
        (status_code = StatusCode::FORBIDDEN, description = "Cannot review your own product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Already reviewed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let review = state
        .app
        .reviews
        .create_review(principal, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stylus_app::domain::{
        products::records::ProductUuid,
        reviews::{ReviewsServiceError, records::ReviewRecord},
    };

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer, partner};

    use super::*;

    fn make_service(app: TestApp, principal: stylus_app::auth::Principal) -> Service {
        app.service_as(principal, Router::with_path("reviews").post(handler))
    }

    #[tokio::test]
    async fn test_create_review_returns_201() -> TestResult {
        let mut app = TestApp::new();
        let product = ProductUuid::new();

        app.reviews
            .expect_create_review()
            .once()
            .withf(move |author, review| {
                author.user_uuid == CUSTOMER_UUID
                    && review.product_uuid == product
                    && review.rating == 5
            })
            .return_once(|author, review| {
                Ok(ReviewRecord {
                    uuid: review.uuid,
                    product_uuid: review.product_uuid,
                    user_uuid: author.user_uuid,
                    author_name: "Test customer".to_string(),
                    rating: review.rating,
                    comment: review.comment,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/reviews")
            .json(&json!({
                "product_uuid": product.into_uuid(),
                "rating": 5,
                "comment": "Stunning",
            }))
            .send(&make_service(app, customer()))
            .await;

        let body: ReviewResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.comment, "Stunning");

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_rating_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.reviews
            .expect_create_review()
            .once()
            .return_once(|_, _| {
                Err(ReviewsServiceError::InvalidReview(
                    "rating must be between 1 and 5",
                ))
            });

        let res = TestClient::post("http://example.com/reviews")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid(), "rating": 9 }))
            .send(&make_service(app, customer()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_own_product_returns_403() -> TestResult {
        let mut app = TestApp::new();

        app.reviews
            .expect_create_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::Forbidden));

        let res = TestClient::post("http://example.com/reviews")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid(), "rating": 5 }))
            .send(&make_service(app, partner()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_second_review_returns_409() -> TestResult {
        let mut app = TestApp::new();

        app.reviews
            .expect_create_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/reviews")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid(), "rating": 3 }))
            .send(&make_service(app, customer()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
