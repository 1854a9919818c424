//! Argon2id password hashing with the crate's default parameters.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

#[cfg(test)]
thread_local! {
    /// Number of verifications run on this thread.
    pub(crate) static VERIFICATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

lazy_static! {
    /// Real hash of a throwaway secret, verified against when the email is unknown
    /// so a miss costs as much as a wrong password.
    static ref DECOY_HASH: String = hash_password("dashgate-decoy-credential").unwrap_or_default();
}

/// PHC-format hash with a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hashing failed");
            anyhow::anyhow!("hash password: {e}")
        })
}

/// `Ok(false)` on mismatch; `Err` only when `stored` is not a PHC string.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    #[cfg(test)]
    VERIFICATIONS.with(|n| n.set(n.get() + 1));

    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored hash is not a PHC string");
        anyhow::anyhow!("parse password hash: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Runs a full verification against the decoy hash and discards the result.
pub fn verify_decoy(plain: &str) {
    let _ = verify_password(plain, &DECOY_HASH);
}
