//! Product Reviews Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::reviews::records::{ProductReviews, ReviewRecord};

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub user_uuid: Uuid,
    pub author_name: String,

    /// 1 to 5
    pub rating: u8,

    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into(),
            product_uuid: review.product_uuid.into(),
            user_uuid: review.user_uuid.into(),
            author_name: review.author_name,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at.to_string(),
            updated_at: review.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductReviewsResponse {
    /// Newest first
    pub reviews: Vec<ReviewResponse>,

    pub count: u32,

    /// Mean rating, `0.0` without reviews
    pub average_rating: f64,
}

impl From<ProductReviews> for ProductReviewsResponse {
    fn from(product: ProductReviews) -> Self {
        Self {
            reviews: product.reviews.into_iter().map(Into::into).collect(),
            count: product.summary.count,
            average_rating: product.summary.average_rating,
        }
    }
}

/// Product Reviews Handler
#[endpoint(
    tags("reviews"),
    summary = "List Product Reviews",
    responses(
        (status_code = StatusCode::OK, description = "Reviews with summary"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .list_for_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into()))
}
