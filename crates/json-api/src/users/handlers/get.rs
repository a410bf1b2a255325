//! Public Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::users::records::{UserRecord, VerificationStatus};

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// The parts of an account other users may see.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PublicProfileResponse {
    pub uuid: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub role: String,
    pub verified: bool,
    pub created_at: String,
}

impl From<UserRecord> for PublicProfileResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into(),
            name: user.name,
            bio: user.bio,
            role: user.role.to_string(),
            verified: matches!(user.verification_status, VerificationStatus::Verified),
            created_at: user.created_at.to_string(),
        }
    }
}

/// Public Profile Handler
#[endpoint(
    tags("users"),
    summary = "Get Public Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PublicProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
