//! Delete Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Delete Review Handler
///
/// Authors may delete their own reviews; admins may delete any.
#[endpoint(
    tags("reviews"),
    summary = "Delete Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Review deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the author"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
    ),
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .reviews
        .delete_review(principal, review.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use stylus_app::domain::reviews::{ReviewsServiceError, records::ReviewUuid};

    use crate::test_helpers::{ADMIN_UUID, TestApp, admin, partner};

    use super::*;

    fn make_service(app: TestApp, principal: stylus_app::auth::Principal) -> Service {
        app.service_as(
            principal,
            Router::with_path("reviews/{review}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_deletes_review() -> TestResult {
        let mut app = TestApp::new();
        let uuid = ReviewUuid::new();

        app.reviews
            .expect_delete_review()
            .once()
            .withf(move |actor, review| actor.user_uuid == ADMIN_UUID && *review == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/reviews/{uuid}"))
            .send(&make_service(app, admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_author_returns_403() -> TestResult {
        let mut app = TestApp::new();

        app.reviews
            .expect_delete_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::Forbidden));

        let res = TestClient::delete(format!("http://example.com/reviews/{}", ReviewUuid::new()))
            .send(&make_service(app, partner()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
