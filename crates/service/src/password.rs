//! Salted argon2 password hashing shared by seller and store logins.

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

pub fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| ServiceError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| ServiceError::Hash(e.to_string()))?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}

pub fn validate_password(plain: &str, min_len: usize) -> Result<(), ServiceError> {
    if plain.chars().count() < min_len {
        return Err(ServiceError::Validation(format!("password too short (>={min_len})")));
    }
    Ok(())
}
