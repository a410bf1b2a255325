//! Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::AlreadyExists => {
            StatusError::conflict().brief("You have already reviewed this product")
        }
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        ReviewsServiceError::InvalidReview(reason) => StatusError::bad_request().brief(reason),
        ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to perform this action")
        }
        ReviewsServiceError::Sql(source) => {
            error!("reviews storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
