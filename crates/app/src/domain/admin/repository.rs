//! Admin Repository

use sqlx::{FromRow, Postgres, Transaction, postgres::PgRow, query_as};

use crate::domain::{admin::records::PlatformStats, columns::try_get_amount};

const PLATFORM_STATS_SQL: &str = include_str!("sql/platform_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAdminRepository;

impl PgAdminRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn platform_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<PlatformStats, sqlx::Error> {
        query_as::<Postgres, PlatformStats>(PLATFORM_STATS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PlatformStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            users: try_get_amount(row, "users")?,
            partners: try_get_amount(row, "partners")?,
            pending_verifications: try_get_amount(row, "pending_verifications")?,
            active_products: try_get_amount(row, "active_products")?,
            orders: try_get_amount(row, "orders")?,
            gross_merchandise_volume: try_get_amount(row, "gross_merchandise_volume")?,
            pending_withdrawals: try_get_amount(row, "pending_withdrawals")?,
            pending_withdrawal_amount: try_get_amount(row, "pending_withdrawal_amount")?,
        })
    }
}
