//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        columns::UnknownVariant,
        rentals::{RentalWindow, RentalWindowError, rental_price},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Completed rentals after which an item must also be offered for sale.
pub const SALE_THRESHOLD_RENTALS: u32 = 5;

/// How a buyer acquires an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Rental,
    Purchase,
}

impl ItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rental => "rental",
            Self::Purchase => "purchase",
        }
    }
}

impl FromStr for ItemKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rental" => Ok(Self::Rental),
            "purchase" => Ok(Self::Purchase),
            _ => Err(UnknownVariant::new("item kind", value)),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    Active,
    Sold,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            _ => Err(UnknownVariant::new("product status", value)),
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub owner_uuid: UserUuid,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    pub rental_price_per_day: Option<u64>,
    pub sale_price: u64,
    pub is_for_rent: bool,
    pub is_for_sale: bool,
    pub rental_count: u32,
    pub status: ProductStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Whether the product can currently be ordered as `kind`.
    #[must_use]
    pub fn is_available_as(&self, kind: ItemKind) -> bool {
        if self.deleted_at.is_some() || self.status != ProductStatus::Active {
            return false;
        }

        match kind {
            ItemKind::Rental => self.is_for_rent && self.rental_price_per_day.is_some(),
            ItemKind::Purchase => self.is_for_sale,
        }
    }

    /// Price of one order line for this product.
    ///
    /// Purchases cost the sale price; rentals cost the daily rate times the
    /// inclusive number of days in `window`. Returns `None` when the product
    /// is not offered that way or a rental has no window.
    ///
    /// # Errors
    ///
    /// Returns an error when the rental total overflows.
    pub fn quote(
        &self,
        kind: ItemKind,
        window: Option<&RentalWindow>,
    ) -> Result<Option<u64>, RentalWindowError> {
        match (kind, self.rental_price_per_day, window) {
            (ItemKind::Purchase, _, _) if self.is_for_sale => Ok(Some(self.sale_price)),
            (ItemKind::Rental, Some(per_day), Some(window)) if self.is_for_rent => {
                rental_price(per_day, window).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Whether a product with `rental_count` completed rentals must be for sale.
#[must_use]
pub const fn must_be_for_sale(rental_count: u32) -> bool {
    rental_count >= SALE_THRESHOLD_RENTALS
}
