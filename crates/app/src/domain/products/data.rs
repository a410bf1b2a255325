//! Products Data

use std::{fmt, str::FromStr};

use crate::domain::{
    columns::UnknownVariant,
    pagination::Page,
    products::records::{ProductRecord, ProductUuid, must_be_for_sale},
    users::records::UserUuid,
};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
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
}

/// Product Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub rental_price_per_day: Option<u64>,
    pub sale_price: Option<u64>,
    pub is_for_rent: Option<bool>,
    pub is_for_sale: Option<bool>,
}

impl ProductUpdate {
    /// Merge this update over `current`, re-applying the for-sale threshold.
    #[must_use]
    pub fn apply(self, current: &ProductRecord) -> ProductRecord {
        let rental_count = current.rental_count;

        let is_for_sale =
            self.is_for_sale.unwrap_or(current.is_for_sale) || must_be_for_sale(rental_count);

        ProductRecord {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            brand: self.brand.unwrap_or_else(|| current.brand.clone()),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            sizes: self.sizes.unwrap_or_else(|| current.sizes.clone()),
            images: self.images.unwrap_or_else(|| current.images.clone()),
            rental_price_per_day: self.rental_price_per_day.or(current.rental_price_per_day),
            sale_price: self.sale_price.unwrap_or(current.sale_price),
            is_for_rent: self.is_for_rent.unwrap_or(current.is_for_rent),
            is_for_sale,
            ..current.clone()
        }
    }
}

/// Check the listing rules shared by create and update.
///
/// # Errors
///
/// Returns a human-readable reason when the listing is not valid.
pub fn validate_listing(
    name: &str,
    brand: &str,
    category: &str,
    rental_price_per_day: Option<u64>,
    sale_price: u64,
    is_for_rent: bool,
    is_for_sale: bool,
) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name is required");
    }

    if brand.trim().is_empty() || category.trim().is_empty() {
        return Err("brand and category are required");
    }

    if !is_for_rent && !is_for_sale {
        return Err("product must be offered for rent or for sale");
    }

    if is_for_rent && !rental_price_per_day.is_some_and(|price| price > 0) {
        return Err("rental products need a daily rental price");
    }

    if sale_price == 0 {
        return Err("sale price must be positive");
    }

    Ok(())
}

/// Whether the catalog is browsed for rentals or purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    Rent,
    Buy,
}

impl ListingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Buy => "buy",
        }
    }
}

impl FromStr for ListingMode {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rent" => Ok(Self::Rent),
            "buy" => Ok(Self::Buy),
            _ => Err(UnknownVariant::new("listing mode", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Popular,
}

impl ProductSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Popular => "popular",
        }
    }
}

impl FromStr for ProductSort {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "popular" => Ok(Self::Popular),
            _ => Err(UnknownVariant::new("sort order", value)),
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog search filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub owner: Option<UserUuid>,
    pub search: Option<String>,
    pub mode: Option<ListingMode>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub sort: ProductSort,
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::products::records::ProductStatus;

    use super::*;

    fn product(rental_count: u32) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            owner_uuid: UserUuid::new(),
            name: "Trench".to_string(),
            description: "Classic".to_string(),
            brand: "Heritage".to_string(),
            category: "outerwear".to_string(),
            sizes: vec!["M".to_string()],
            images: Vec::new(),
            rental_price_per_day: Some(3_000),
            sale_price: 90_000,
            is_for_rent: true,
            is_for_sale: rental_count >= 5,
            rental_count,
            status: ProductStatus::Active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    #[test]
    fn apply_keeps_untouched_fields() {
        let current = product(0);

        let updated = ProductUpdate {
            name: Some("Long trench".to_string()),
            ..ProductUpdate::default()
        }
        .apply(&current);

        assert_eq!(updated.name, "Long trench");
        assert_eq!(updated.brand, current.brand);
        assert_eq!(updated.uuid, current.uuid);
    }

    #[test]
    fn apply_cannot_withdraw_sale_past_threshold() {
        let current = product(5);

        let updated = ProductUpdate {
            is_for_sale: Some(false),
            ..ProductUpdate::default()
        }
        .apply(&current);

        assert!(updated.is_for_sale);
    }

    #[test]
    fn listing_must_be_offered_somehow() {
        assert_eq!(
            validate_listing("Bag", "Brand", "bags", None, 100, false, false),
            Err("product must be offered for rent or for sale")
        );
    }

    #[test]
    fn rental_listing_needs_daily_price() {
        assert!(validate_listing("Bag", "Brand", "bags", None, 100, true, false).is_err());
        assert!(validate_listing("Bag", "Brand", "bags", Some(0), 100, true, false).is_err());
        assert!(validate_listing("Bag", "Brand", "bags", Some(10), 100, true, false).is_ok());
    }

    #[test]
    fn parses_sort_orders() {
        assert_eq!("price_desc".parse::<ProductSort>().ok(), Some(ProductSort::PriceDesc));
        assert!("cheapest".parse::<ProductSort>().is_err());
    }
}
