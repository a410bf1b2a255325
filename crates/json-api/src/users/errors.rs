//! User Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        UsersServiceError::InvalidStatus => StatusError::conflict()
            .brief("Verification cannot be requested in the current state"),
        UsersServiceError::Forbidden => {
            StatusError::forbidden().brief("Operation not permitted on this user")
        }
        UsersServiceError::Sql(source) => {
            error!("users storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
