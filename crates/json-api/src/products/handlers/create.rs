//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stylus_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub brand: String,
    pub category: String,

    #[serde(default)]
    pub sizes: Vec<String>,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Required when `is_for_rent` is set
    pub rental_price_per_day: Option<u64>,

    pub sale_price: u64,

    #[serde(default = "default_for_rent")]
    pub is_for_rent: bool,

    #[serde(default)]
    pub is_for_sale: bool,
}

const fn default_for_rent() -> bool {
    true
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            name: request.name,
            description: request.description,
            brand: request.brand,
            category: request.category,
            sizes: request.sizes,
            images: request.images,
            rental_price_per_day: request.rental_price_per_day,
            sale_price: request.sale_price,
            is_for_rent: request.is_for_rent,
            is_for_sale: request.is_for_sale,
        }
    }
}

/// Create Product Handler
///
/// Lists a new product owned by the calling partner.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Only verified partners may list products"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let product = state
        .app
        .products
        .create_product(principal, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
