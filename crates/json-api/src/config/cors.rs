//! CORS Config

use clap::Args;
use salvo::{
    cors::{Any, Cors, CorsHandler},
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};

/// Cross-origin settings.
#[derive(Debug, Args)]
pub struct CorsConfig {
    /// Origin the web client is served from, or `*` for any origin
    #[arg(long, env = "CORS_ALLOWED_ORIGIN", default_value = "http://localhost:5173")]
    pub cors_allowed_origin: String,
}

impl CorsConfig {
    /// Build the CORS middleware for the configured origin.
    #[must_use]
    pub fn handler(&self) -> CorsHandler {
        let cors = if self.cors_allowed_origin.trim() == "*" {
            Cors::new().allow_origin(Any)
        } else {
            Cors::new().allow_origin(self.cors_allowed_origin.trim())
        };

        cors.allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec![AUTHORIZATION, CONTENT_TYPE])
        .into_handler()
    }
}
