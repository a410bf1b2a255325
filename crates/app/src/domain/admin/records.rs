//! Admin Records

/// Marketplace-wide counters for the admin console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformStats {
    pub users: u64,
    pub partners: u64,
    pub pending_verifications: u64,
    pub active_products: u64,
    pub orders: u64,

    /// Sum of every order total, in minor units.
    pub gross_merchandise_volume: u64,

    pub pending_withdrawals: u64,
    pub pending_withdrawal_amount: u64,
}
