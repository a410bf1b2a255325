//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::products::data::{ListingMode, ProductFilter, ProductSort};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Searches the active catalog.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    brand: QueryParam<String, false>,
    size: QueryParam<String, false>,
    owner: QueryParam<Uuid, false>,
    search: QueryParam<String, false>,
    mode: QueryParam<String, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    sort: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner(),
        brand: brand.into_inner(),
        size: size.into_inner(),
        owner: owner.into_inner().map(Into::into),
        search: search.into_inner().filter(|search| !search.trim().is_empty()),
        mode: mode
            .into_inner()
            .map(|mode| mode.parse::<ListingMode>())
            .transpose()
            .or_400("mode must be \"rent\" or \"buy\"")?,
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
        sort: sort
            .into_inner()
            .map(|sort| sort.parse::<ProductSort>())
            .transpose()
            .or_400("unknown sort order")?
            .unwrap_or_default(),
        page: (limit, offset).into_page(),
    };

    let products = state
        .app
        .products
        .list_products(filter)
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

    use stylus_app::domain::{pagination::Page, products::records::ProductUuid};

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.public_service(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_unfiltered_listing_uses_defaults() -> TestResult {
        let mut app = TestApp::new();

        app.products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::default())
            .return_once(|_| Ok(vec![make_product(ProductUuid::new())]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(app))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_filters_are_forwarded() -> TestResult {
        let mut app = TestApp::new();

        app.products
            .expect_list_products()
            .once()
            .withf(|filter| {
                *filter
                    == ProductFilter {
                        category: Some("dresses".to_string()),
                        search: Some("silk".to_string()),
                        mode: Some(ListingMode::Rent),
                        max_price: Some(2_000),
                        sort: ProductSort::PriceAsc,
                        page: Page::new(Some(12), None),
                        ..ProductFilter::default()
                    }
            })
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get(
            "http://example.com/products?category=dresses&search=silk&mode=rent&max_price=2000&sort=price_asc&limit=12",
        )
        .send(&make_service(app))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_mode_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?mode=lease")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
