//! Wishlist Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    columns::try_get_timestamp,
    products::records::ProductUuid,
    users::records::UserUuid,
    wishlist::records::{WishlistItemRecord, WishlistItemUuid},
};

const LIST_WISHLIST_ITEMS_SQL: &str = include_str!("sql/list_wishlist_items.sql");
const CREATE_WISHLIST_ITEM_SQL: &str = include_str!("sql/create_wishlist_item.sql");
const DELETE_WISHLIST_ITEM_SQL: &str = include_str!("sql/delete_wishlist_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistRepository;

impl PgWishlistRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<WishlistItemRecord>, sqlx::Error> {
        query_as::<Postgres, WishlistItemRecord>(LIST_WISHLIST_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, sqlx::Error> {
        query_as::<Postgres, WishlistItemRecord>(CREATE_WISHLIST_ITEM_SQL)
            .bind(WishlistItemUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WISHLIST_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WishlistItemUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
