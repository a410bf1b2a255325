//! Get Product Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The listing partner
    pub owner_uuid: Uuid,

    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub sizes: Vec<String>,
    pub images: Vec<String>,

    /// Daily rental price in minor units
    pub rental_price_per_day: Option<u64>,

    /// Purchase price in minor units
    pub sale_price: u64,

    pub is_for_rent: bool,
    pub is_for_sale: bool,

    /// Completed rentals so far
    pub rental_count: u32,

    /// `active` or `sold`
    pub status: String,

    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            owner_uuid: product.owner_uuid.into(),
            name: product.name,
            description: product.description,
            brand: product.brand,
            category: product.category,
            sizes: product.sizes,
            images: product.images,
            rental_price_per_day: product.rental_price_per_day,
            sale_price: product.sale_price,
            is_for_rent: product.is_for_rent,
            is_for_sale: product.is_for_sale,
            rental_count: product.rental_count,
            status: product.status.to_string(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
            deleted_at: product.deleted_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
