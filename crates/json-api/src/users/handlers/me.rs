//! Current User Handler

use std::{string::ToString, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::users::records::UserRecord;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Full account view, shown to the account holder and to admins.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,

    /// `customer`, `partner` or `admin`
    pub role: String,

    /// `unverified`, `pending`, `verified` or `rejected`
    pub verification_status: String,

    /// Wallet balance in minor units
    pub wallet_balance: u64,

    pub suspended_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into(),
            email: user.email,
            name: user.name,
            phone: user.phone,
            address: user.address,
            bio: user.bio,
            role: user.role.to_string(),
            verification_status: user.verification_status.to_string(),
            wallet_balance: user.wallet_balance,
            suspended_at: user.suspended_at.as_ref().map(ToString::to_string),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Get Current User Handler
#[endpoint(
    tags("users"),
    summary = "Get Current User",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .users
        .get_user(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stylus_app::domain::users::{UsersServiceError, records::Role};

    use crate::test_helpers::{CUSTOMER_UUID, TestApp, customer, make_user};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service_as(customer(), Router::with_path("users/me").get(handler))
    }

    #[tokio::test]
    async fn test_me_returns_the_callers_account() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_get_user()
            .once()
            .withf(|user| *user == CUSTOMER_UUID)
            .return_once(|uuid| Ok(make_user(uuid, Role::Customer)));

        let mut res = TestClient::get("http://example.com/users/me")
            .send(&make_service(app))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, CUSTOMER_UUID.into_uuid());
        assert_eq!(body.role, "customer");
        assert_eq!(body.verification_status, "verified");

        Ok(())
    }

    #[tokio::test]
    async fn test_me_for_deleted_account_returns_404() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get("http://example.com/users/me")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
