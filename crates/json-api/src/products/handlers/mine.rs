//! Owned Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductsResponse},
    state::State,
};

/// Owned Products Handler
///
/// Lists the caller's own listings, sold ones included.
#[endpoint(
    tags("products"),
    summary = "List My Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let products = state
        .app
        .products
        .list_owned_products(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stylus_app::domain::products::records::{ProductStatus, ProductUuid};

    use crate::test_helpers::{PARTNER_UUID, TestApp, make_product, partner};

    use super::*;

    #[tokio::test]
    async fn test_mine_lists_owned_products() -> TestResult {
        let mut app = TestApp::new();

        app.products
            .expect_list_owned_products()
            .once()
            .withf(|owner| *owner == PARTNER_UUID)
            .return_once(|_| {
                let mut sold = make_product(ProductUuid::new());

                sold.status = ProductStatus::Sold;

                Ok(vec![make_product(ProductUuid::new()), sold])
            });

        let mut res = TestClient::get("http://example.com/products/mine")
            .send(&app.service_as(partner(), Router::with_path("products/mine").get(handler)))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.products.len(), 2);
        assert_eq!(body.products[1].status, "sold");

        Ok(())
    }
}
