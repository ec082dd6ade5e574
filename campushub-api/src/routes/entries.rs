/// Project and event endpoints (authenticated)
///
/// - `GET    /api/projects`: the caller's entries
/// - `POST   /api/projects`: create an entry
/// - `DELETE /api/projects/:id`: delete one of the caller's entries
/// - `GET    /api/all-projects`: every entry, newest first

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::MessageResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campushub_shared::{
    auth::middleware::AuthContext,
    models::entry::{Entry, EntryWithCreator},
    signup::{EntryInput, SignupError},
};
use uuid::Uuid;

pub async fn list_own_entries(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<EntryWithCreator>>> {
    Ok(Json(Entry::list_by_owner(&state.db, auth.user_id).await?))
}

pub async fn list_all_entries(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> ApiResult<Json<Vec<EntryWithCreator>>> {
    Ok(Json(Entry::list_all(&state.db).await?))
}

/// Creates an entry hosted by the caller
///
/// ```text
/// POST /api/projects
/// { "project_name": "Hackathon", "project_description": "...", "links": "a,b", "type": "event" }
/// ```
///
/// `type` defaults to `project`. Answers `201` with the stored entry.
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<EntryInput>,
) -> ApiResult<(StatusCode, Json<Entry>)> {
    let has_name = input
        .project_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(ApiError::BadRequest("Event name is required.".to_string()));
    }

    let new_entry = input.normalize(0).map_err(|e| match e {
        SignupError::InvalidEntry { reason, .. } => ApiError::BadRequest(reason),
        other => ApiError::BadRequest(other.to_string()),
    })?;

    let entry = Entry::create(&state.db, auth.user_id, &new_entry).await?;

    tracing::info!(entry_id = %entry.id, user_id = %auth.user_id, kind = %entry.kind, "Entry created");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let entry = Entry::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found.".to_string()))?;

    if !entry.is_owned_by(auth.user_id) {
        return Err(ApiError::Forbidden(
            "You are not authorized to delete this event.".to_string(),
        ));
    }

    // Deleted concurrently by the owner from another request
    if !Entry::delete_owned(&state.db, id, auth.user_id).await? {
        return Err(ApiError::NotFound("Event not found.".to_string()));
    }

    tracing::info!(entry_id = %id, user_id = %auth.user_id, "Entry deleted");

    Ok(Json(MessageResponse {
        message: "Event deleted successfully!".to_string(),
    }))
}
