//! Auth Config

use std::time::Duration;

use clap::Args;

use stylus_app::settings::{AuthSettings, parse_expires_in};

/// Session token settings.
#[derive(Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session lifetime, e.g. 3600, 45m, 12h or 7d
    #[arg(long, env = "JWT_EXPIRES_IN", default_value = "7d", value_parser = parse_expires_in)]
    pub jwt_expires_in: Duration,
}

impl AuthConfig {
    #[must_use]
    pub fn settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl: self.jwt_expires_in,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"**redacted**")
            .field("jwt_expires_in", &self.jwt_expires_in)
            .finish()
    }
}
