//! Admin service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::admin::{records::PlatformStats, repository::PgAdminRepository},
};

#[derive(Debug, Clone)]
pub struct PgAdminService {
    db: Db,
    repository: PgAdminRepository,
}

impl PgAdminService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAdminRepository::new(),
        }
    }
}

#[async_trait]
impl AdminService for PgAdminService {
    async fn stats(&self) -> Result<PlatformStats, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.platform_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn stats(&self) -> Result<PlatformStats, sqlx::Error>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            users::records::{Role, VerificationStatus},
            wallet::WalletService,
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn stats_count_the_marketplace() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = ctx.create_partner().await;
        let customer = ctx.create_customer().await;

        ctx.create_user(Role::Customer, VerificationStatus::Pending)
            .await;
        ctx.create_listing(&partner, "Gown").await;
        ctx.fund(&customer, 10_000).await;
        ctx.wallet
            .request_withdrawal(customer.uuid, 2_500, None)
            .await?;

        let stats = ctx.admin.stats().await?;

        assert_eq!(stats.users, 3);
        assert_eq!(stats.partners, 1);
        assert_eq!(stats.pending_verifications, 1);
        assert_eq!(stats.active_products, 1);
        assert_eq!(stats.orders, 0);
        assert_eq!(stats.gross_merchandise_volume, 0);
        assert_eq!(stats.pending_withdrawals, 1);
        assert_eq!(stats.pending_withdrawal_amount, 2_500);

        Ok(())
    }
}
