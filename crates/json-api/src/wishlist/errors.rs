//! Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::domain::wishlist::WishlistServiceError;

pub(crate) fn into_status_error(error: WishlistServiceError) -> StatusError {
    match error {
        WishlistServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product is already in the wishlist")
        }
        WishlistServiceError::NotFound => {
            StatusError::not_found().brief("Product is not in the wishlist")
        }
        WishlistServiceError::InvalidReference => {
            StatusError::not_found().brief("Product not found")
        }
        WishlistServiceError::Sql(source) => {
            error!("wishlist storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
