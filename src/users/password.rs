use anyhow::anyhow;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

/// Hash a plaintext password for the password_hash column.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow!("password hashing failed: {e}"))
}

/// Check a plaintext password against a stored hash. A hash that does not
/// parse is a store error, not a failed match.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| anyhow!("stored password hash is malformed: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_password_verifies() {
        let hash = hash_password("winter goals 2024!").unwrap();
        assert!(verify_password("winter goals 2024!", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("run a 10k in march").unwrap();
        assert!(!verify_password("run a 5k in march", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let a = hash_password("repeat-this-weekly").unwrap();
        let b = hash_password("repeat-this-weekly").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("whatever", "plaintext-left-in-column").is_err());
    }
}
