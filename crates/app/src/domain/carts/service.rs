//! Carts service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem},
            errors::CartsServiceError,
            records::{Cart, CartItemRecord, CartItemUuid, CartLine},
            repository::PgCartItemsRepository,
        },
        products::{
            records::{ItemKind, ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        rentals::{RentalWindow, today_utc},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items: PgCartItemsRepository,
    products: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items: PgCartItemsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

/// Check that `user` may put `product` in their cart as `kind`.
pub(crate) fn validate_item(
    user: UserUuid,
    product: &ProductRecord,
    kind: ItemKind,
    size: Option<&str>,
    window: Option<&RentalWindow>,
    today: Date,
) -> Result<(), CartsServiceError> {
    if product.owner_uuid == user {
        return Err(CartsServiceError::OwnProduct);
    }

    if !product.is_available_as(kind) {
        return Err(CartsServiceError::Unavailable);
    }

    match (kind, window) {
        (ItemKind::Rental, None) => {
            return Err(CartsServiceError::InvalidItem(
                "rental items need a start and end date",
            ));
        }
        (ItemKind::Rental, Some(window)) => window.validate(today)?,
        (ItemKind::Purchase, Some(_)) => {
            return Err(CartsServiceError::InvalidItem(
                "purchases cannot have rental dates",
            ));
        }
        (ItemKind::Purchase, None) => {}
    }

    if let Some(size) = size
        && !product.sizes.is_empty()
        && !product.sizes.iter().any(|offered| offered == size)
    {
        return Err(CartsServiceError::InvalidItem("size is not offered"));
    }

    Ok(())
}

/// Pair cart items with their products and current prices.
pub(crate) fn price_lines(
    user_uuid: UserUuid,
    items: Vec<CartItemRecord>,
    products: Vec<ProductRecord>,
) -> Cart {
    let mut by_uuid: FxHashMap<ProductUuid, ProductRecord> = products
        .into_iter()
        .map(|product| (product.uuid, product))
        .collect();

    let lines: Vec<CartLine> = items
        .into_iter()
        .filter_map(|item| {
            let product = by_uuid.remove(&item.product_uuid)?;

            let price = if product.is_available_as(item.kind) {
                product
                    .quote(item.kind, item.rental_window.as_ref())
                    .ok()
                    .flatten()
            } else {
                None
            };

            Some(CartLine {
                item,
                product,
                price,
            })
        })
        .collect();

    let subtotal = lines
        .iter()
        .filter_map(|line| line.price)
        .fold(0_u64, u64::saturating_add);

    Cart {
        user_uuid,
        lines,
        subtotal,
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.items.list_cart_items(&mut tx, user).await?;

        let product_uuids: Vec<ProductUuid> = items.iter().map(|item| item.product_uuid).collect();

        let products = self
            .products
            .list_products_by_uuid(&mut tx, &product_uuids)
            .await?;

        tx.commit().await?;

        Ok(price_lines(user, items, products))
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .products
            .get_product(&mut tx, item.product_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                other => CartsServiceError::from(other),
            })?;

        validate_item(
            user,
            &product,
            item.kind,
            item.size.as_deref(),
            item.rental_window.as_ref(),
            today_utc(),
        )?;

        let created = self.items.create_cart_item(&mut tx, user, &item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.items.get_cart_item(&mut tx, user, item).await?;

        let product = self
            .products
            .get_product(&mut tx, current.product_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::Unavailable,
                other => CartsServiceError::from(other),
            })?;

        let size = update.size.or(current.size);
        let rental_window = update.rental_window.or(current.rental_window);

        validate_item(
            user,
            &product,
            current.kind,
            size.as_deref(),
            rental_window.as_ref(),
            today_utc(),
        )?;

        let updated = self
            .items
            .update_cart_item(&mut tx, user, item, size.as_deref(), rental_window.as_ref())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.items.delete_cart_item(&mut tx, user, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart with current prices.
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Adds a product to the cart. Each product may appear once per cart.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Change the size or rental dates of a cart item.
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Removes an item from the cart.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Removes every item from the cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::{
        domain::rentals::RentalWindowError,
        test::{
            TestContext,
            helpers::{purchase_item, rental_item, window_from_today},
        },
    };

    use super::*;

    #[tokio::test]
    async fn adding_rental_item_prices_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;
        let product = ctx.create_listing(&partner, "Gown").await;

        let window = window_from_today(3, 5);

        let item = ctx
            .carts
            .add_item(customer.uuid, rental_item(product.uuid, window))
            .await?;

        assert_eq!(item.kind, ItemKind::Rental);
        assert_eq!(item.rental_window, Some(window));

        let cart = ctx.carts.get_cart(customer.uuid).await?;

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].product.uuid, product.uuid);

        let expected = product.rental_price_per_day.unwrap_or_default() * 5;

        assert_eq!(cart.lines[0].price, Some(expected));
        assert_eq!(cart.subtotal, expected);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_twice_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;
        let product = ctx.create_listing(&partner, "Gown").await;

        let window = window_from_today(3, 5);

        ctx.carts
            .add_item(customer.uuid, rental_item(product.uuid, window))
            .await?;

        let result = ctx
            .carts
            .add_item(customer.uuid, rental_item(product.uuid, window))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cannot_add_own_product() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let product = ctx.create_listing(&partner, "Gown").await;

        let result = ctx
            .carts
            .add_item(partner.uuid, rental_item(product.uuid, window_from_today(1, 2)))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::OwnProduct)),
            "expected OwnProduct, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn rental_starting_yesterday_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;
        let product = ctx.create_listing(&partner, "Gown").await;

        let today = today_utc();
        let window = RentalWindow::new(today.checked_sub(1.day())?, today)?;

        let result = ctx
            .carts
            .add_item(customer.uuid, rental_item(product.uuid, window))
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InvalidWindow(
                    RentalWindowError::StartsInPast
                ))
            ),
            "expected StartsInPast, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn purchase_of_rental_only_product_is_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;
        let product = ctx.create_listing(&partner, "Gown").await;

        let result = ctx
            .carts
            .add_item(customer.uuid, purchase_item(product.uuid))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adding_unknown_product_returns_product_not_found() {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer().await;

        let result = ctx
            .carts
            .add_item(customer.uuid, purchase_item(ProductUuid::new()))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_changes_window() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;
        let product = ctx.create_listing(&partner, "Gown").await;

        let item = ctx
            .carts
            .add_item(
                customer.uuid,
                rental_item(product.uuid, window_from_today(1, 1)),
            )
            .await?;

        let longer = window_from_today(1, 7);

        let updated = ctx
            .carts
            .update_item(
                customer.uuid,
                item.uuid,
                CartItemUpdate {
                    rental_window: Some(longer),
                    ..CartItemUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.rental_window, Some(longer));

        Ok(())
    }

    #[tokio::test]
    async fn remove_and_clear() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;

        let first = ctx.create_listing(&partner, "First").await;
        let second = ctx.create_listing(&partner, "Second").await;

        let item = ctx
            .carts
            .add_item(customer.uuid, rental_item(first.uuid, window_from_today(1, 1)))
            .await?;

        ctx.carts
            .add_item(customer.uuid, rental_item(second.uuid, window_from_today(1, 1)))
            .await?;

        ctx.carts.remove_item(customer.uuid, item.uuid).await?;

        assert_eq!(ctx.carts.get_cart(customer.uuid).await?.lines.len(), 1);

        let again = ctx.carts.remove_item(customer.uuid, item.uuid).await;

        assert!(
            matches!(again, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        ctx.carts.clear_cart(customer.uuid).await?;

        assert!(ctx.carts.get_cart(customer.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn other_users_items_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;
        let other = ctx.create_customer().await;
        let product = ctx.create_listing(&partner, "Gown").await;

        let item = ctx
            .carts
            .add_item(customer.uuid, rental_item(product.uuid, window_from_today(1, 1)))
            .await?;

        let result = ctx.carts.remove_item(other.uuid, item.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
