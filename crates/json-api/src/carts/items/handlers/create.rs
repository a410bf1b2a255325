//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::{
    carts::{data::NewCartItem, records::CartItemUuid},
    products::records::ItemKind,
};

use crate::{
    carts::{errors::into_status_error, get::CartItemResponse, items::rental_window},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartItemRequest {
    pub product_uuid: Uuid,

    /// `rental` or `purchase`
    pub kind: String,

    pub size: Option<String>,

    /// `YYYY-MM-DD`, rentals only
    pub rental_start: Option<String>,

    /// `YYYY-MM-DD`, rentals only
    pub rental_end: Option<String>,
}

impl CreateCartItemRequest {
    fn into_new_item(self) -> Result<NewCartItem, StatusError> {
        let kind = self
            .kind
            .parse::<ItemKind>()
            .or_400("kind must be \"rental\" or \"purchase\"")?;

        Ok(NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: self.product_uuid.into(),
            kind,
            size: self.size,
            rental_window: rental_window(self.rental_start.as_deref(), self.rental_end.as_deref())?,
        })
    }
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart item created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product already in cart or not available"),
        (status_code = StatusCode::FORBIDDEN, description = "Own product"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let item = state
        .app
        .carts
        .add_item(principal.user_uuid, json.into_inner().into_new_item()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/cart/items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
