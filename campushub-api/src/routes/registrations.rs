/// Joining other users' entries
///
/// Registering and notifying the host happen in one transaction: either
/// both rows are written or neither is.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campushub_shared::{
    auth::middleware::AuthContext,
    models::{
        entry::Entry,
        notification::{registration_message, CreateNotification, Notification},
        registration::{Registrant, Registration},
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub registration_id: Uuid,
}

/// Registers the caller for an entry
///
/// ```text
/// POST /api/projects/:id/register
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: the caller hosts the entry
/// - `404 Not Found`: entry or caller does not exist
/// - `409 Conflict`: already registered
pub async fn register(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(project_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let entry = Entry::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found.".to_string()))?;

    let joinee = User::find_public(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    if entry.is_owned_by(joinee.id) {
        return Err(ApiError::BadRequest(
            "You cannot register for your own event.".to_string(),
        ));
    }

    let mut tx = state.db.begin().await?;

    if Registration::exists(&mut *tx, joinee.id, project_id).await? {
        return Err(ApiError::Conflict(
            "You have already registered for this event.".to_string(),
        ));
    }

    let registration = Registration::create(&mut *tx, project_id, joinee.id).await?;

    Notification::create(
        &mut *tx,
        &CreateNotification {
            recipient_id: entry.user_id,
            project_id,
            joinee_id: joinee.id,
            message: registration_message(&joinee.name, entry.kind, &entry.project_name),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        registration_id = %registration.id,
        project_id = %project_id,
        user_id = %joinee.id,
        "Registered for entry"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Successfully registered for the event!".to_string(),
            registration_id: registration.id,
        }),
    ))
}

/// Lists who registered for an entry; host only
///
/// ```text
/// GET /api/projects/:id/registrations
/// ```
pub async fn list_registrations(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Registrant>>> {
    let entry = Entry::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found.".to_string()))?;

    if !entry.is_owned_by(auth.user_id) {
        return Err(ApiError::Forbidden(
            "You are not authorized to view registrations for this event.".to_string(),
        ));
    }

    Ok(Json(Registration::registrants(&state.db, project_id).await?))
}
