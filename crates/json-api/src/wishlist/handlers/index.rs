//! Wishlist Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::wishlist::records::{WishlistEntry, WishlistItemRecord};

use crate::{
    extensions::*, products::get::ProductResponse, state::State,
    wishlist::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub created_at: String,
}

impl From<WishlistItemRecord> for WishlistItemResponse {
    fn from(item: WishlistItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            created_at: item.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistEntryResponse {
    pub item: WishlistItemResponse,
    pub product: ProductResponse,
}

impl From<WishlistEntry> for WishlistEntryResponse {
    fn from(entry: WishlistEntry) -> Self {
        Self {
            item: entry.item.into(),
            product: entry.product.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    /// Saved products, most recent first
    pub items: Vec<WishlistEntryResponse>,
}

/// Wishlist Index Handler
#[endpoint(
    tags("wishlist"),
    summary = "List Wishlist",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let entries = state
        .app
        .wishlist
        .list(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(WishlistResponse {
        items: entries.into_iter().map(Into::into).collect(),
    }))
}
