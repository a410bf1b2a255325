//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidListing(reason) => StatusError::bad_request().brief(reason),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Forbidden => {
            StatusError::forbidden().brief("Only the owner or an admin may change this product")
        }
        ProductsServiceError::NotVerified => {
            StatusError::forbidden().brief("Only verified partners may list products")
        }
        ProductsServiceError::Sql(source) => {
            error!("products storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
