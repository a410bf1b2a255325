//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        products::records::{ItemKind, ProductRecord, ProductUuid},
        rentals::RentalWindow,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub kind: ItemKind,
    pub size: Option<String>,
    pub rental_window: Option<RentalWindow>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item together with its product and current price.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItemRecord,
    pub product: ProductRecord,

    /// `None` when the product can no longer be ordered this way.
    pub price: Option<u64>,
}

/// A user's cart.
#[derive(Debug, Clone)]
pub struct Cart {
    pub user_uuid: UserUuid,
    pub lines: Vec<CartLine>,

    /// Sum of the priced lines.
    pub subtotal: u64,
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
