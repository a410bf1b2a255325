//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    columns::{
        amount_to_i64, try_get_amount, try_get_count, try_get_enum, try_get_optional_amount,
        try_get_optional_timestamp, try_get_timestamp,
    },
    products::{
        data::{NewProduct, ProductFilter},
        records::{ProductRecord, ProductUuid, SALE_THRESHOLD_RENTALS},
    },
    users::records::UserUuid,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_OWNED_PRODUCTS_SQL: &str = include_str!("sql/list_owned_products.sql");
const LIST_PRODUCTS_BY_UUID_SQL: &str = include_str!("sql/list_products_by_uuid.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const RECORD_RENTAL_COMPLETION_SQL: &str = include_str!("sql/record_rental_completion.sql");
const MARK_SOLD_SQL: &str = include_str!("sql/mark_sold.sql");

fn optional_amount_to_i64(col: &str, amount: Option<u64>) -> Result<Option<i64>, sqlx::Error> {
    amount.map(|amount| amount_to_i64(col, amount)).transpose()
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.as_deref())
            .bind(filter.brand.as_deref())
            .bind(filter.size.as_deref())
            .bind(filter.owner.map(UserUuid::into_uuid))
            .bind(filter.search.as_deref())
            .bind(filter.mode.map(|mode| mode.as_str()))
            .bind(optional_amount_to_i64("min_price", filter.min_price)?)
            .bind(optional_amount_to_i64("max_price", filter.max_price)?)
            .bind(filter.sort.as_str())
            .bind(filter.page.limit_i64())
            .bind(filter.page.offset_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_owned_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_OWNED_PRODUCTS_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch products by UUID, including sold and deleted ones.
    pub(crate) async fn list_products_by_uuid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_BY_UUID_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an undeleted product and hold its row lock until the
    /// transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(product.name.trim())
            .bind(&product.description)
            .bind(product.brand.trim())
            .bind(product.category.trim())
            .bind(Json(&product.sizes))
            .bind(Json(&product.images))
            .bind(optional_amount_to_i64(
                "rental_price_per_day",
                product.rental_price_per_day,
            )?)
            .bind(amount_to_i64("sale_price", product.sale_price)?)
            .bind(product.is_for_rent)
            .bind(product.is_for_sale)
            .fetch_one(&mut **tx)
            .await
    }

    /// Write every editable column of `product`.
    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name.trim())
            .bind(&product.description)
            .bind(product.brand.trim())
            .bind(product.category.trim())
            .bind(Json(&product.sizes))
            .bind(Json(&product.images))
            .bind(optional_amount_to_i64(
                "rental_price_per_day",
                product.rental_price_per_day,
            )?)
            .bind(amount_to_i64("sale_price", product.sale_price)?)
            .bind(product.is_for_rent)
            .bind(product.is_for_sale)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Count a finished rental, forcing the product on sale once it crosses
    /// the threshold.
    pub(crate) async fn record_rental_completion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let threshold = i32::try_from(SALE_THRESHOLD_RENTALS).unwrap_or(i32::MAX);

        query_as::<Postgres, ProductRecord>(RECORD_RENTAL_COMPLETION_SQL)
            .bind(product.into_uuid())
            .bind(threshold)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_sold(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_SOLD_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            brand: row.try_get("brand")?,
            category: row.try_get("category")?,
            sizes: row.try_get::<Json<Vec<String>>, _>("sizes")?.0,
            images: row.try_get::<Json<Vec<String>>, _>("images")?.0,
            rental_price_per_day: try_get_optional_amount(row, "rental_price_per_day")?,
            sale_price: try_get_amount(row, "sale_price")?,
            is_for_rent: row.try_get("is_for_rent")?,
            is_for_sale: row.try_get("is_for_sale")?,
            rental_count: try_get_count(row, "rental_count")?,
            status: try_get_enum(row, "status")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            deleted_at: try_get_optional_timestamp(row, "deleted_at")?,
        })
    }
}
