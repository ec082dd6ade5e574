/// Notification endpoints (authenticated)
///
/// Routes with a `:userId` segment only serve the caller's own
/// notifications.

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
    models::{
        entry::Entry,
        notification::{joined_message, CreateNotification, Notification, NotificationView},
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub project_id: Uuid,
    pub joinee_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub message: String,
    pub updated: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

fn ensure_self(auth: &AuthContext, user_id: Uuid) -> ApiResult<()> {
    if auth.user_id == user_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You can only access your own notifications.".to_string(),
        ))
    }
}

/// Notifies an entry's host that `joineeId` joined it
///
/// ```text
/// POST /api/notifications
/// { "projectId": "uuid", "joineeId": "uuid" }
/// ```
pub async fn create_notification(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<CreateNotificationRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let (entry, joinee) = tokio::try_join!(
        Entry::find_by_id(&state.db, req.project_id),
        User::find_public(&state.db, req.joinee_id),
    )?;

    let (Some(entry), Some(joinee)) = (entry, joinee) else {
        return Err(ApiError::NotFound("Project or user not found".to_string()));
    };

    Notification::create(
        &state.db,
        &CreateNotification {
            recipient_id: entry.user_id,
            project_id: entry.id,
            joinee_id: joinee.id,
            message: joined_message(&joinee.name),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Notification created successfully".to_string(),
        }),
    ))
}

pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<NotificationView>>> {
    ensure_self(&auth, user_id)?;
    Ok(Json(Notification::list_for_user(&state.db, user_id).await?))
}

pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<MarkReadResponse>> {
    ensure_self(&auth, user_id)?;

    let updated = Notification::mark_all_read(&state.db, user_id).await?;

    Ok(Json(MarkReadResponse {
        message: "Notifications marked as read".to_string(),
        updated,
    }))
}

pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UnreadCountResponse>> {
    ensure_self(&auth, user_id)?;

    let count = Notification::unread_count(&state.db, user_id).await?;

    Ok(Json(UnreadCountResponse { count }))
}
