//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    cors::CorsConfig,
    db::DatabaseConfig,
    marketplace::MarketplaceConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod db;
pub(crate) mod marketplace;
pub(crate) mod observability;
pub(crate) mod server;

/// Stylus JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "stylus-json", about = "Stylus JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Marketplace economics.
    #[command(flatten)]
    pub marketplace: MarketplaceConfig,

    /// Cross-origin settings for the web client.
    #[command(flatten)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
