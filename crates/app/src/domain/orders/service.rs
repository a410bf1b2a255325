//! Orders service.
//!
//! Checkout and every item status change run in one database transaction
//! together with the ledger entries they cause.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        carts::{repository::PgCartItemsRepository, service::validate_item},
        orders::{
            data::{Checkout, PartnerItemFilter},
            errors::OrdersServiceError,
            records::{Order, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repository::{NewOrderItem, PgOrdersRepository},
            status::{OrderItemStatus, Party, check_transition},
        },
        pagination::Page,
        products::{records::ItemKind, repository::PgProductsRepository},
        rentals::{RentalWindow, today_utc},
        users::records::UserUuid,
        wallet::{
            records::LedgerEntryKind,
            repository::{PgLedgerRepository, Posting},
        },
    },
    settings::MarketplaceSettings,
};

/// Whether a held item blocks booking the product as `kind`.
///
/// Rentals only clash with rentals whose windows overlap. A purchase clashes
/// with anything held, and anything clashes with a held purchase.
fn blocks(held: &OrderItemRecord, kind: ItemKind, window: Option<&RentalWindow>) -> bool {
    match (kind, held.kind) {
        (ItemKind::Rental, ItemKind::Rental) => held
            .rental_window
            .as_ref()
            .zip(window)
            .is_some_and(|(booked, wanted)| booked.overlaps(wanted)),
        (ItemKind::Purchase, _) | (_, ItemKind::Purchase) => true,
    }
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    cart_items: PgCartItemsRepository,
    products: PgProductsRepository,
    ledger: PgLedgerRepository,
    marketplace: MarketplaceSettings,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, marketplace: MarketplaceSettings) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            products: PgProductsRepository::new(),
            ledger: PgLedgerRepository::new(),
            marketplace,
        }
    }

    /// Attach items to each order, keeping the order of `orders`.
    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: Vec<OrderRecord>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let order_uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items_by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> =
            FxHashMap::default();

        for item in self.orders.list_order_items(tx, &order_uuids).await? {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.uuid).unwrap_or_default();

                Order { order, items }
            })
            .collect())
    }

    /// Move the money a status change implies.
    async fn settle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: UserUuid,
        item: &OrderItemRecord,
        status: OrderItemStatus,
    ) -> Result<(), OrdersServiceError> {
        let reference = item.order_uuid.into_uuid();

        if status.refunds_buyer() && item.price > 0 {
            let mut wallet = self.ledger.lock_wallet(tx, buyer).await?;

            self.ledger
                .post(
                    tx,
                    &mut wallet,
                    Posting::completed(LedgerEntryKind::Refund, item.price, "Order item refund")
                        .with_reference(reference)
                        .with_counterparty(item.partner_uuid),
                )
                .await?;
        }

        if status == OrderItemStatus::Completed {
            let payout = self.marketplace.payout_for(item.price);

            if payout > 0 {
                let mut wallet = self.ledger.lock_wallet(tx, item.partner_uuid).await?;

                self.ledger
                    .post(
                        tx,
                        &mut wallet,
                        Posting::completed(LedgerEntryKind::Payout, payout, "Order item payout")
                            .with_reference(reference)
                            .with_counterparty(buyer),
                    )
                    .await?;
            }

            match item.kind {
                ItemKind::Rental => {
                    self.products
                        .record_rental_completion(tx, item.product_uuid)
                        .await?;
                }
                ItemKind::Purchase => {
                    self.products.mark_sold(tx, item.product_uuid).await?;
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        buyer: UserUuid,
        checkout: Checkout,
    ) -> Result<Order, OrdersServiceError> {
        if let Some(field) = checkout.shipping_address.missing_field() {
            return Err(OrdersServiceError::InvalidAddress(field));
        }

        let today = today_utc();

        let mut tx = self.db.begin().await?;

        let mut wallet = self.ledger.lock_wallet(&mut tx, buyer).await?;

        if !wallet.may_transact() {
            return Err(OrdersServiceError::NotVerified);
        }

        let mut cart = self.cart_items.list_cart_items(&mut tx, buyer).await?;

        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        // Products are locked in UUID order.
        cart.sort_by_key(|item| item.product_uuid);

        let mut lines = Vec::with_capacity(cart.len());
        let mut total: u64 = 0;

        for item in cart {
            let product = self
                .products
                .lock_product(&mut tx, item.product_uuid)
                .await
                .map_err(|error| match error {
                    sqlx::Error::RowNotFound => OrdersServiceError::Unavailable,
                    other => OrdersServiceError::from(other),
                })?;

            validate_item(
                buyer,
                &product,
                item.kind,
                item.size.as_deref(),
                item.rental_window.as_ref(),
                today,
            )?;

            let held = self.orders.list_held_items(&mut tx, product.uuid).await?;

            if held
                .iter()
                .any(|other| blocks(other, item.kind, item.rental_window.as_ref()))
            {
                return Err(OrdersServiceError::Unavailable);
            }

            let price = product
                .quote(item.kind, item.rental_window.as_ref())?
                .ok_or(OrdersServiceError::Unavailable)?;

            total = total
                .checked_add(price)
                .ok_or(OrdersServiceError::BalanceOverflow)?;

            lines.push(NewOrderItem {
                product_uuid: product.uuid,
                partner_uuid: product.owner_uuid,
                kind: item.kind,
                size: item.size,
                rental_window: item.rental_window,
                price,
            });
        }

        let order_uuid = OrderUuid::new();

        if total > 0 {
            self.ledger
                .post(
                    &mut tx,
                    &mut wallet,
                    Posting::completed(LedgerEntryKind::Payment, total, "Order payment")
                        .with_reference(order_uuid.into_uuid()),
                )
                .await?;
        }

        let order = self
            .orders
            .create_order(
                &mut tx,
                order_uuid,
                buyer,
                total,
                &checkout.shipping_address,
            )
            .await?;

        let mut items = Vec::with_capacity(lines.len());

        for line in &lines {
            items.push(self.orders.create_order_item(&mut tx, order_uuid, line).await?);
        }

        self.cart_items.clear_cart(&mut tx, buyer).await?;

        tx.commit().await?;

        info!(order = %order.uuid, buyer = %buyer, total, items = items.len(), "order placed");

        Ok(Order { order, items })
    }

    async fn list_orders(&self, buyer: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.orders.list_user_orders(&mut tx, buyer).await?;
        let orders = self.with_items(&mut tx, records).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(&self, page: Page) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.orders.list_orders(&mut tx, page).await?;
        let orders = self.with_items(&mut tx, records).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.orders.get_order(&mut tx, order).await?;
        let mut orders = self.with_items(&mut tx, vec![record]).await?;

        tx.commit().await?;

        let order = orders.pop().ok_or(OrdersServiceError::NotFound)?;

        if actor.is_admin() || order.order.user_uuid == actor.user_uuid {
            return Ok(order);
        }

        if !order.involves_partner(actor.user_uuid) {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(order.for_partner(actor.user_uuid))
    }

    async fn list_partner_items(
        &self,
        partner: UserUuid,
        filter: PartnerItemFilter,
    ) -> Result<Vec<OrderItemRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self
            .orders
            .list_partner_items(&mut tx, partner, filter)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn update_item_status(
        &self,
        actor: Principal,
        item: OrderItemUuid,
        status: OrderItemStatus,
    ) -> Result<OrderItemRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders.lock_order_item(&mut tx, item).await?;
        let order = self.orders.get_order(&mut tx, current.order_uuid).await?;

        let party = if actor.is_admin() {
            Party::Admin
        } else if actor.user_uuid == current.partner_uuid {
            Party::Partner
        } else if actor.user_uuid == order.user_uuid {
            Party::Buyer
        } else {
            return Err(OrdersServiceError::NotFound);
        };

        check_transition(current.status, status, current.kind, party)?;

        self.settle(&mut tx, order.user_uuid, &current, status)
            .await?;

        let updated = self.orders.set_item_status(&mut tx, item, status).await?;

        tx.commit().await?;

        info!(
            item = %item,
            from = %current.status,
            to = %status,
            actor = %actor.user_uuid,
            "order item status changed"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the buyer's cart into an order, paying from their wallet.
    async fn checkout(
        &self,
        buyer: UserUuid,
        checkout: Checkout,
    ) -> Result<Order, OrdersServiceError>;

    /// Orders placed by `buyer`, newest first.
    async fn list_orders(&self, buyer: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    async fn list_all_orders(&self, page: Page) -> Result<Vec<Order>, OrdersServiceError>;

    /// An order visible to its buyer and admins. Partners see only their own
    /// lines of it.
    async fn get_order(
        &self,
        actor: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    async fn list_partner_items(
        &self,
        partner: UserUuid,
        filter: PartnerItemFilter,
    ) -> Result<Vec<OrderItemRecord>, OrdersServiceError>;

    /// Move an item through its lifecycle, refunding or paying out as the
    /// new status requires.
    async fn update_item_status(
        &self,
        actor: Principal,
        item: OrderItemUuid,
        status: OrderItemStatus,
    ) -> Result<OrderItemRecord, OrdersServiceError>;
}
