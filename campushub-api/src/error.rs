/// Error handling for the API server
///
/// Every handler returns `ApiResult<T>`; [`ApiError`] turns into a JSON body
/// `{error, message, details?}` with a matching status code.
///
/// # Example
///
/// ```
/// use campushub_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler(name: Option<String>) -> ApiResult<Json<Value>> {
///     let name = name.ok_or_else(|| ApiError::BadRequest("Event name is required.".to_string()))?;
///     Ok(Json(json!({ "name": name })))
/// }
/// ```

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campushub_shared::{
    auth::{jwt::JwtError, middleware::AuthError, password::PasswordError},
    signup::{SignupError, SignupStage},
    uploads::UploadError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409), e.g. duplicate email or repeated registration
    Conflict(String),

    /// Unprocessable entity (422)
    ValidationError(Vec<ValidationErrorDetail>),

    /// A signup storage step failed and was rolled back (500)
    StorageFailure {
        stage: SignupStage,
        detail: String,
    },

    /// Internal server error (500)
    InternalError(String),

    /// Service unavailable (503)
    ServiceUnavailable(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::StorageFailure { .. } | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::StorageFailure { stage, detail } => write!(f, "{}: {}", stage, detail),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error_code, message, details) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::Unauthorized(msg) => ("unauthorized", msg, None),
            ApiError::Forbidden(msg) => ("forbidden", msg, None),
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::Conflict(msg) => ("conflict", msg, None),
            ApiError::ValidationError(errors) => (
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::StorageFailure { stage, detail } => {
                tracing::error!(stage = %stage, error = %detail, "Signup storage failure");
                ("storage_error", stage.message().to_string(), None)
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal error occurred".to_string(), None)
            }
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg, None),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    if db_err.constraint().is_some_and(|c| c.contains("email")) {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    return ApiError::Conflict("Resource already exists".to_string());
                }
                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ApiError::ServiceUnavailable("Database unavailable".to_string())
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::MissingField(_)
            | SignupError::MalformedList { .. }
            | SignupError::InvalidEntry { .. } => ApiError::BadRequest(err.to_string()),
            SignupError::Hash(e) => e.into(),
            SignupError::Storage { stage, source } => {
                if stage == SignupStage::User && is_unique_violation(&source) {
                    ApiError::Conflict("Email already exists".to_string())
                } else {
                    ApiError::StorageFailure {
                        stage,
                        detail: source.to_string(),
                    }
                }
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized(err.to_string()),
            AuthError::InvalidToken(_) => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Token creation failures; validation goes through [`AuthError`].
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::InternalError(format!("Token operation failed: {}", err))
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let details = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_signup_validation_is_bad_request() {
        let err: ApiError = SignupError::MissingField("rollNumber").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad request: Missing required field: rollNumber");
    }

    #[test]
    fn test_signup_storage_failure_names_stage() {
        let err: ApiError = SignupError::Storage {
            stage: SignupStage::Skill,
            source: sqlx::Error::PoolTimedOut,
        }
        .into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::StorageFailure { stage: SignupStage::Skill, .. }));
    }

    #[test]
    fn test_auth_errors() {
        let missing: ApiError = AuthError::MissingToken.into();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let invalid: ApiError = AuthError::InvalidToken(JwtError::Expired).into();
        assert_eq!(invalid.status(), StatusCode::FORBIDDEN);
        assert!(invalid.to_string().contains("Invalid or expired token"));
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err: ApiError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
