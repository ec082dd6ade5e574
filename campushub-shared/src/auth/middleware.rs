/// Request authentication context
///
/// The API's auth layer turns an `Authorization: Bearer <token>` header into
/// an [`AuthContext`] stored in request extensions. Handlers then take
/// `AuthContext` as an extractor argument.
///
/// # Example
///
/// ```
/// use campushub_shared::auth::middleware::AuthContext;
///
/// async fn handler(auth: AuthContext) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, Claims, JwtError};

/// Identity of the caller of an authenticated route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Authentication failure
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token on the request
    #[error("Authentication required: No token provided.")]
    MissingToken,

    /// Token present but unusable (bad signature, expired, wrong issuer)
    #[error("Forbidden: Invalid or expired token.")]
    InvalidToken(#[source] JwtError),
}

/// Validates an `Authorization` header value and builds the caller context.
///
/// Anything other than `Bearer <token>` counts as a missing token.
pub fn authenticate(authorization: Option<&str>, secret: &str) -> Result<AuthContext, AuthError> {
    let token = authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = validate_token(token, secret).map_err(AuthError::InvalidToken)?;

    Ok(AuthContext::from_claims(claims))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or((StatusCode::UNAUTHORIZED, "Authentication required"))
    }
}
