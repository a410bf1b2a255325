//! Wishlist Records

use jiff::Timestamp;

use crate::{
    domain::{
        products::records::{ProductRecord, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Wishlist Item UUID
pub type WishlistItemUuid = TypedUuid<WishlistItemRecord>;

/// Wishlist Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistItemRecord {
    pub uuid: WishlistItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub created_at: Timestamp,
}

/// A saved product.
#[derive(Debug, Clone)]
pub struct WishlistEntry {
    pub item: WishlistItemRecord,
    pub product: ProductRecord,
}
