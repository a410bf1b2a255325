//! Marketplace Config

use clap::Args;

use stylus_app::settings::{MarketplaceSettings, parse_fee_bps};

/// Marketplace economics.
#[derive(Debug, Args)]
pub struct MarketplaceConfig {
    /// Platform commission withheld from partner payouts, in basis points
    #[arg(long, env = "PLATFORM_FEE_BPS", default_value = "1000", value_parser = parse_fee_bps)]
    pub platform_fee_bps: u16,
}

impl MarketplaceConfig {
    #[must_use]
    pub fn settings(&self) -> MarketplaceSettings {
        MarketplaceSettings {
            platform_fee_bps: self.platform_fee_bps,
        }
    }
}
