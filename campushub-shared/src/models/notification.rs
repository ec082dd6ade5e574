/// Notification model
///
/// Entry hosts are notified when someone joins one of their entries. The
/// recipient is always the host (`user_id`); the joinee is the actor.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notifications (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     joinee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     message TEXT NOT NULL,
///     is_read BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::entry::EntryKind;

/// Maximum number of notifications returned by a listing
pub const LIST_LIMIT: i64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,

    /// Recipient (entry host)
    pub user_id: Uuid,

    pub project_id: Uuid,

    /// User who joined
    pub joinee_id: Uuid,

    pub message: String,

    pub is_read: bool,

    pub created_at: DateTime<Utc>,
}

/// Notification joined with the entry and joinee it refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub notification: Notification,

    pub project_title: String,

    pub project_type: String,

    pub joinee_username: String,
}

/// Input for creating a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNotification {
    pub recipient_id: Uuid,
    pub project_id: Uuid,
    pub joinee_id: Uuid,
    pub message: String,
}

/// Message sent to a host when someone registers for their entry.
pub fn registration_message(joinee_name: &str, kind: EntryKind, entry_name: &str) -> String {
    format!("{} has registered for your {}: {}", joinee_name, kind, entry_name)
}

/// Message for an explicitly created join notification.
pub fn joined_message(joinee_name: &str) -> String {
    format!("{} has joined your project!", joinee_name)
}

impl Notification {
    pub async fn create<'e, E>(executor: E, data: &CreateNotification) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, project_id, joinee_id, message, is_read)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id, user_id, project_id, joinee_id, message, is_read, created_at
            "#,
        )
        .bind(data.recipient_id)
        .bind(data.project_id)
        .bind(data.joinee_id)
        .bind(&data.message)
        .fetch_one(executor)
        .await
    }

    /// Newest notifications for a recipient, capped at [`LIST_LIMIT`].
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<NotificationView>, sqlx::Error> {
        sqlx::query_as::<_, NotificationView>(
            r#"
            SELECT n.id, n.user_id, n.project_id, n.joinee_id, n.message, n.is_read, n.created_at,
                   p.project_name AS project_title,
                   p.type AS project_type,
                   u.name AS joinee_username
            FROM notifications n
            JOIN projects p ON n.project_id = p.id
            JOIN users u ON n.joinee_id = u.id
            WHERE n.user_id = $1
            ORDER BY n.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// Marks every unread notification of a recipient as read.
    ///
    /// Returns the number of rows changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn unread_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
