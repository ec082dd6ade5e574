/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Caller identity extracted from bearer tokens
///
/// # Example
///
/// ```
/// use campushub_shared::auth::jwt::{create_token, Claims};
/// use campushub_shared::auth::middleware::authenticate;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "secret-key-that-is-at-least-32-bytes";
/// let token = create_token(&Claims::new(Uuid::new_v4(), "ana@x.com", Duration::hours(1)), secret)?;
/// let ctx = authenticate(Some(&format!("Bearer {}", token)), secret)?;
/// assert_eq!(ctx.email, "ana@x.com");
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
