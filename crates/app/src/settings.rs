//! Application settings shared by the server and the CLI.

use std::time::Duration;

use thiserror::Error;

/// Largest fee expressible in basis points (100%).
pub const MAX_FEE_BPS: u16 = 10_000;

/// Default session lifetime (7 days).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Authentication settings.
#[derive(Clone)]
pub struct AuthSettings {
    /// HMAC secret used to sign session tokens.
    pub jwt_secret: String,

    /// How long an issued session token stays valid.
    pub token_ttl: Duration,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"**redacted**")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

/// Marketplace economics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketplaceSettings {
    /// Platform commission withheld from partner payouts, in basis points.
    pub platform_fee_bps: u16,
}

impl Default for MarketplaceSettings {
    fn default() -> Self {
        Self {
            platform_fee_bps: 1_000,
        }
    }
}

impl MarketplaceSettings {
    /// Platform fee owed on `amount`, rounded down.
    #[must_use]
    pub fn fee_for(self, amount: u64) -> u64 {
        let bps = u128::from(self.platform_fee_bps.min(MAX_FEE_BPS));
        let fee = u128::from(amount) * bps / u128::from(MAX_FEE_BPS);

        // fee <= amount because bps <= 10_000
        u64::try_from(fee).unwrap_or(amount)
    }

    /// Amount paid out to a partner after the platform fee.
    #[must_use]
    pub fn payout_for(self, amount: u64) -> u64 {
        amount - self.fee_for(amount)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("duration is empty")]
    EmptyDuration,

    #[error("invalid duration \"{0}\"; expected e.g. 3600, 45m, 12h or 7d")]
    InvalidDuration(String),

    #[error("platform fee must be between 0 and {MAX_FEE_BPS} basis points")]
    InvalidFee,
}

/// Parse a token lifetime such as `3600`, `90s`, `45m`, `12h` or `7d`.
///
/// # Errors
///
/// Returns an error when the value is empty, has an unknown unit, or overflows.
pub fn parse_expires_in(raw: &str) -> Result<Duration, SettingsError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(SettingsError::EmptyDuration);
    }

    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());

    let (digits, unit) = raw.split_at(split);

    let value: u64 = digits
        .parse()
        .map_err(|_ignored| SettingsError::InvalidDuration(raw.to_string()))?;

    let multiplier: u64 = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return Err(SettingsError::InvalidDuration(raw.to_string())),
    };

    let seconds = value
        .checked_mul(multiplier)
        .filter(|seconds| *seconds > 0)
        .ok_or_else(|| SettingsError::InvalidDuration(raw.to_string()))?;

    Ok(Duration::from_secs(seconds))
}

/// Parse and range-check a platform fee in basis points.
///
/// # Errors
///
/// Returns an error when the value is not a number between 0 and 10000.
pub fn parse_fee_bps(raw: &str) -> Result<u16, SettingsError> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|bps| *bps <= MAX_FEE_BPS)
        .ok_or(SettingsError::InvalidFee)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_expires_in("3600"), Ok(Duration::from_secs(3600)));
    }

    #[test]
    fn parses_units() {
        assert_eq!(parse_expires_in("90s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_expires_in("45m"), Ok(Duration::from_secs(45 * 60)));
        assert_eq!(parse_expires_in("12h"), Ok(Duration::from_secs(12 * 3600)));
        assert_eq!(parse_expires_in("7d"), Ok(DEFAULT_TOKEN_TTL));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_expires_in(""), Err(SettingsError::EmptyDuration));
        assert!(parse_expires_in("7w").is_err());
        assert!(parse_expires_in("d").is_err());
        assert!(parse_expires_in("0").is_err());
        assert!(parse_expires_in("99999999999999999999d").is_err());
    }

    #[test]
    fn fee_rounds_down() {
        let settings = MarketplaceSettings {
            platform_fee_bps: 1_000,
        };

        assert_eq!(settings.fee_for(10_000), 1_000);
        assert_eq!(settings.fee_for(999), 99);
        assert_eq!(settings.payout_for(999), 900);
    }

    #[test]
    fn zero_fee_pays_everything() {
        let settings = MarketplaceSettings {
            platform_fee_bps: 0,
        };

        assert_eq!(settings.payout_for(12_345), 12_345);
    }

    #[test]
    fn fee_bps_is_range_checked() {
        assert_eq!(parse_fee_bps("250"), Ok(250));
        assert_eq!(parse_fee_bps("10000"), Ok(10_000));
        assert_eq!(parse_fee_bps("10001"), Err(SettingsError::InvalidFee));
        assert_eq!(parse_fee_bps("-1"), Err(SettingsError::InvalidFee));
    }
}
