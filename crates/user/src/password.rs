//! One-way salted password hashing.
//!
//! Hashes are Argon2id PHC strings, so the salt and cost parameters travel
//! with the hash and verification needs nothing else. Both operations are
//! CPU bound; the async variants move the work onto the blocking pool so a
//! login never stalls other requests on the same worker.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use formforge_shared::{Error, Result};

/// Verified against when no account matches, so an unknown email costs the
/// same Argon2 work as a wrong password. Carries the default parameters and
/// an all-zero digest.
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$Zm9ybWZvcmdlLWR1bW15IQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn hash_sync(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Returns `Ok(false)` on mismatch. A stored hash that cannot be parsed is an
/// infrastructure fault and surfaces as [`Error::Hashing`].
pub fn verify_sync(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::Hashing(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn hash(password: impl Into<String>) -> Result<String> {
    let password = password.into();

    tokio::task::spawn_blocking(move || hash_sync(&password)).await?
}

pub async fn verify(password: impl Into<String>, hash: impl Into<String>) -> Result<bool> {
    let password = password.into();
    let hash = hash.into();

    tokio::task::spawn_blocking(move || verify_sync(&password, &hash)).await?
}
