//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stylus_app::{
    auth::{NewRegistration, Session},
    domain::users::records::Role,
};

use crate::{
    auth::errors::into_status_error, extensions::*, state::State, users::me::UserResponse,
};

/// Registration Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,

    /// `customer` (default) or `partner`
    pub role: Option<String>,
}

/// A signed session and the account it belongs to.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    pub expires_at: String,
    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at.to_string(),
            user: session.user.into(),
        }
    }
}

/// Register Handler
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let role = request
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .or_400("unknown role")?
        .unwrap_or(Role::Customer);

    let session = state
        .app
        .auth
        .register(NewRegistration {
            email: request.email,
            password: request.password,
            name: request.name,
            phone: request.phone,
            role,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}
