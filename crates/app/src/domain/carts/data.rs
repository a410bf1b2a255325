//! Cart Data

use crate::domain::{
    carts::records::CartItemUuid,
    products::records::{ItemKind, ProductUuid},
    rentals::RentalWindow,
};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub kind: ItemKind,
    pub size: Option<String>,
    pub rental_window: Option<RentalWindow>,
}

/// Cart Item Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub size: Option<String>,
    pub rental_window: Option<RentalWindow>,
}
