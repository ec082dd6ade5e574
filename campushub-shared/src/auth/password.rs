/// Password hashing with Argon2id
///
/// Cost parameters are fixed constants so every stored hash has the same
/// strength. The plaintext never leaves this module's call stack: it is not
/// logged and not stored.
///
/// # Example
///
/// ```
/// use campushub_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("pw123456")?;
/// assert!(verify_password("pw123456", &hash)?);
/// assert!(!verify_password("pw654321", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Memory cost in KiB (19 MiB)
pub const MEMORY_COST_KIB: u32 = 19_456;

/// Number of passes
pub const TIME_COST: u32 = 2;

/// Degree of parallelism
pub const PARALLELISM: u32 = 1;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(MEMORY_COST_KIB)
        .t_cost(TIME_COST)
        .p_cost(PARALLELISM)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password into a PHC string (`$argon2id$v=19$m=...`).
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored PHC hash.
///
/// `Ok(false)` means a wrong password; `Err` means the stored hash itself is
/// unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    if parsed.hash.is_none() {
        return Err(PasswordError::InvalidHash("Hash has no output segment".to_string()));
    }

    // Parameters come from the parsed hash, not from `hasher()`.
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_uses_fixed_parameters() {
        let hash = hash_password("pw123456").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hash.contains(&format!("m={}", MEMORY_COST_KIB)));
        assert!(hash.contains(&format!("t={}", TIME_COST)));
        assert!(hash.contains(&format!("p={}", PARALLELISM)));
        assert!(!hash.contains("pw123456"));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("correct_password").unwrap();

        assert!(verify_password("correct_password", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("password", "invalid_hash"),
            Err(PasswordError::InvalidHash(_))
        ));
        assert!(matches!(
            verify_password("password", "$argon2id$invalid"),
            Err(PasswordError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_unicode_password() {
        let hash = hash_password("unicode-密码-パスワード").unwrap();
        assert!(verify_password("unicode-密码-パスワード", &hash).unwrap());
    }
}
