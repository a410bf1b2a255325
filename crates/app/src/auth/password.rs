//! Password hashing (Argon2id).

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash,

    #[error("password does not match")]
    Mismatch,
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns an error when Argon2 fails to produce a hash.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Verify a password against a stored PHC-format hash.
///
/// # Errors
///
/// Returns [`PasswordError::Mismatch`] when the password is wrong or the
/// stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::Mismatch)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_then_verify() -> TestResult {
        let hash = hash_password("correct horse")?;

        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(verify_password("correct horse", &hash), Ok(()));
        assert_eq!(
            verify_password("battery staple", &hash),
            Err(PasswordError::Mismatch)
        );

        Ok(())
    }

    #[test]
    fn salts_differ() -> TestResult {
        assert_ne!(hash_password("same")?, hash_password("same")?);

        Ok(())
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert_eq!(
            verify_password("anything", "not-a-hash"),
            Err(PasswordError::Mismatch)
        );
    }
}
