//! Orders Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    columns::{
        amount_to_i64, try_get_amount, try_get_enum, try_get_rental_window, try_get_timestamp,
        window_dates,
    },
    orders::{
        data::PartnerItemFilter,
        records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid, ShippingAddress},
        status::OrderItemStatus,
    },
    pagination::Page,
    products::records::{ItemKind, ProductUuid},
    rentals::RentalWindow,
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const LIST_PARTNER_ITEMS_SQL: &str = include_str!("sql/list_partner_items.sql");
const LIST_HELD_ITEMS_SQL: &str = include_str!("sql/list_held_items.sql");
const LOCK_ORDER_ITEM_SQL: &str = include_str!("sql/lock_order_item.sql");
const SET_ITEM_STATUS_SQL: &str = include_str!("sql/set_item_status.sql");

/// Order line priced at checkout.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem {
    pub product_uuid: ProductUuid,
    pub partner_uuid: UserUuid,
    pub kind: ItemKind,
    pub size: Option<String>,
    pub rental_window: Option<RentalWindow>,
    pub price: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        buyer: UserUuid,
        total: u64,
        shipping_address: &ShippingAddress,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(buyer.into_uuid())
            .bind(amount_to_i64("total", total)?)
            .bind(Json(shipping_address))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &NewOrderItem,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        let (rental_start, rental_end) = window_dates(item.rental_window.as_ref());

        let rental_days = item
            .rental_window
            .map(|window| i32::try_from(window.days()).unwrap_or(i32::MAX));

        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.partner_uuid.into_uuid())
            .bind(item.kind.as_str())
            .bind(item.size.as_deref())
            .bind(rental_start)
            .bind(rental_end)
            .bind(rental_days)
            .bind(amount_to_i64("price", item.price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(buyer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_partner_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        partner: UserUuid,
        filter: PartnerItemFilter,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LIST_PARTNER_ITEMS_SQL)
            .bind(partner.into_uuid())
            .bind(filter.status.map(OrderItemStatus::as_str))
            .bind(filter.page.limit_i64())
            .bind(filter.page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Items of `product` that still hold stock or a rental window.
    pub(crate) async fn list_held_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let statuses: Vec<&str> = OrderItemStatus::HOLDING_CALENDAR
            .iter()
            .map(|status| status.as_str())
            .collect();

        query_as::<Postgres, OrderItemRecord>(LIST_HELD_ITEMS_SQL)
            .bind(product.into_uuid())
            .bind(statuses)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LOCK_ORDER_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_item_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        status: OrderItemStatus,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(SET_ITEM_STATUS_SQL)
            .bind(item.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            total: try_get_amount(row, "total")?,
            shipping_address: row
                .try_get::<Json<ShippingAddress>, _>("shipping_address")?
                .0,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rental_days = row
            .try_get::<Option<i32>, _>("rental_days")?
            .map(|days| u32::try_from(days).unwrap_or_default());

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            partner_uuid: UserUuid::from_uuid(row.try_get("partner_uuid")?),
            kind: try_get_enum(row, "kind")?,
            size: row.try_get("size")?,
            rental_window: try_get_rental_window(row)?,
            rental_days,
            price: try_get_amount(row, "price")?,
            status: try_get_enum(row, "status")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
