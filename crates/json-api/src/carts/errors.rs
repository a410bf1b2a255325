//! Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product is already in the cart")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::InvalidItem(reason) => StatusError::bad_request().brief(reason),
        CartsServiceError::InvalidWindow(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        CartsServiceError::Unavailable => {
            StatusError::conflict().brief("Product is not available this way")
        }
        CartsServiceError::OwnProduct => {
            StatusError::forbidden().brief("You cannot add your own product to your cart")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
