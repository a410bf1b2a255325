//! Session token signing and verification (HS256 JWT).

use std::{fmt, time::Duration};

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{
    domain::users::records::{Role, UserUuid},
    settings::AuthSettings,
};

/// Registered and private claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret is empty")]
    EmptySecret,

    #[error("token lifetime is out of range")]
    InvalidLifetime,

    #[error("failed to sign token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token is malformed or has a bad signature")]
    Invalid,

    #[error("token has expired")]
    Expired,
}

/// Signing material for session tokens.
#[derive(Clone)]
pub struct JwtKeys {
    secret: Vec<u8>,
    ttl: Duration,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("secret", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl Drop for JwtKeys {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl JwtKeys {
    /// # Errors
    ///
    /// Returns an error when the secret is empty.
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            secret: secret.to_vec(),
            ttl,
        })
    }

    /// # Errors
    ///
    /// Returns an error when the configured secret is empty.
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, TokenError> {
        Self::new(settings.jwt_secret.as_bytes(), settings.token_ttl)
    }

    /// Sign a token for `user`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error when the lifetime overflows or signing fails.
    pub fn issue(
        &self,
        user: UserUuid,
        role: Role,
        now: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = SignedDuration::try_from(self.ttl).map_err(|_| TokenError::InvalidLifetime)?;

        let expires_at = now
            .checked_add(ttl)
            .map_err(|_| TokenError::InvalidLifetime)?;

        let claims = Claims {
            sub: user.into_uuid(),
            role: role.as_str().to_string(),
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(TokenError::Encode)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check the signature and expiry of `token` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for malformed or forged tokens and
    /// [`TokenError::Expired`] once `exp` has passed.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);

        // expiry is checked against the caller's clock below
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.exp <= now.as_second() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
