/// Account endpoints
///
/// - `POST /signup`: create a user together with skills, entries and files
/// - `POST /login`: exchange email and password for a bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{SignupPayload, UploadedFile},
};
use axum::{extract::State, http::StatusCode, Json};
use campushub_shared::{
    auth::{jwt, password},
    models::user::User,
    signup::SUCCESS_MESSAGE,
    uploads::{StagedFile, UploadStore},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Returned for unknown emails and wrong passwords alike
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "profile_picture")]
    pub profile_picture: Option<String>,
}

/// Registers a new user
///
/// # Endpoint
///
/// ```text
/// POST /signup
/// Content-Type: multipart/form-data | application/json
/// ```
///
/// Text fields: `name`, `email`, `password`, `rollNumber` (required),
/// `department`, `yearOfStudy`, `phoneNumber`, `skills`, `projects`.
/// File fields: `profilePicture` (one), `documents` (up to ten).
///
/// # Errors
///
/// - `400 Bad Request`: missing field, malformed `skills`/`projects`
/// - `409 Conflict`: email already registered
/// - `500 Internal Server Error`: a storage step failed; `message` names it
pub async fn signup(
    State(state): State<AppState>,
    payload: SignupPayload,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let SignupPayload {
        form,
        profile_picture,
        documents,
    } = payload;

    let mut request = form.normalize()?;

    if let Some(file) = profile_picture {
        request.profile_picture = Some(stage(&state.uploads, file).await?);
    }
    for file in documents {
        request.documents.push(stage(&state.uploads, file).await?);
    }

    state.signup.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: SUCCESS_MESSAGE.to_string(),
        }),
    ))
}

async fn stage(uploads: &UploadStore, file: UploadedFile) -> ApiResult<StagedFile> {
    Ok(uploads.stage(&file.file_name, &file.data).await?)
}

/// Authenticates a user
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "email": "ana@x.com", "password": "pw123456" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "✅ Login successful",
///   "token": "eyJ...",
///   "userId": "uuid",
///   "name": "Ana",
///   "profile_picture": "/uploads/..."
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email or wrong password
/// - `422 Unprocessable Entity`: malformed email
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Login rejected");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let claims = jwt::Claims::new(
        user.id,
        user.email.clone(),
        chrono::Duration::seconds(state.config.jwt.expiry_seconds),
    );
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        message: "✅ Login successful".to_string(),
        token,
        user_id: user.id,
        name: user.name,
        profile_picture: user.profile_picture,
    }))
}
