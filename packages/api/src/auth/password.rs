//! # Password hashing and verification: Argon2id
//!
//! - [`hash_password`] generates a random salt via [`OsRng`], hashes the plaintext
//!   with the default Argon2id parameters and returns a PHC-format string
//!   (`$argon2id$v=19$m=19456,t=2,p=1$...`). That string is what lands in the
//!   `password` column of `users`.
//!
//! - [`verify_password`] parses a stored PHC string and checks the plaintext
//!   against it. `Ok(false)` means a mismatch; `Err` means the stored hash is
//!   malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::Error;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Password(format!("failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Password(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let first = hash_password("pw1").unwrap();
        let second = hash_password("pw1").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("pw1"));

        assert!(verify_password("pw1", &first).unwrap());
        assert!(verify_password("pw1", &second).unwrap());
        assert!(!verify_password("pw2", &first).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("pw1", "plaintext").is_err());
    }
}
