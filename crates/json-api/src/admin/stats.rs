//! Platform Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use stylus_app::domain::admin::records::PlatformStats;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub users: u64,
    pub partners: u64,
    pub pending_verifications: u64,
    pub active_products: u64,
    pub orders: u64,

    /// Sum of every order total, in minor units
    pub gross_merchandise_volume: u64,

    pub pending_withdrawals: u64,
    pub pending_withdrawal_amount: u64,
}

impl From<PlatformStats> for StatsResponse {
    fn from(stats: PlatformStats) -> Self {
        Self {
            users: stats.users,
            partners: stats.partners,
            pending_verifications: stats.pending_verifications,
            active_products: stats.active_products,
            orders: stats.orders,
            gross_merchandise_volume: stats.gross_merchandise_volume,
            pending_withdrawals: stats.pending_withdrawals,
            pending_withdrawal_amount: stats.pending_withdrawal_amount,
        }
    }
}

/// Platform Stats Handler
///
/// Admin only.
#[endpoint(
    tags("admin"),
    summary = "Platform Stats",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .admin
        .stats()
        .await
        .or_500("failed to compute platform stats")?;

    Ok(Json(stats.into()))
}
